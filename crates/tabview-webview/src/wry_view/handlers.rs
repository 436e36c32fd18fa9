use std::sync::{Arc, Mutex};

use tracing::debug;
use wry::WebViewBuilder;

use super::history::{NavigationHistory, PendingNavigation};
use crate::observation::ObservationQueue;
use crate::property::{ObservedProperty, PropertySource};

/// Progress reported once a load has started. The engine gives no
/// finer-grained figure through wry.
pub(super) const STARTED_PROGRESS: f64 = 0.1;

/// Page state mirrored from wry callbacks.
#[derive(Debug, Default)]
pub struct ViewState {
    pub loading: bool,
    pub progress: f64,
    pub title: Option<String>,
    pub url: Option<String>,
    pub history: NavigationHistory,
    observer: Option<ObservationQueue>,
    subscribed: Vec<ObservedProperty>,
}

impl ViewState {
    pub fn subscribe(&mut self, properties: &[ObservedProperty], queue: ObservationQueue) {
        for property in properties {
            if !self.subscribed.contains(property) {
                self.subscribed.push(*property);
            }
        }
        self.observer = Some(queue);
    }

    pub fn unsubscribe(&mut self, properties: &[ObservedProperty]) {
        self.subscribed.retain(|p| !properties.contains(p));
        if self.subscribed.is_empty() {
            self.observer = None;
        }
    }

    fn notify(&self, properties: &[ObservedProperty]) {
        let Some(queue) = &self.observer else {
            return;
        };
        for property in properties {
            if self.subscribed.contains(property) {
                queue.notify(*property, property.observed_value(self));
            }
        }
    }

    pub fn page_started(&mut self, url: &str) {
        let (back, forward) = (self.history.can_go_back(), self.history.can_go_forward());
        self.history.commit(url);
        self.loading = true;
        self.progress = STARTED_PROGRESS;
        self.url = Some(url.to_string());

        self.notify(&[
            ObservedProperty::Loading,
            ObservedProperty::EstimatedProgress,
            ObservedProperty::Url,
        ]);
        if back != self.history.can_go_back() {
            self.notify(&[ObservedProperty::CanGoBack]);
        }
        if forward != self.history.can_go_forward() {
            self.notify(&[ObservedProperty::CanGoForward]);
        }
    }

    pub fn page_finished(&mut self, url: &str) {
        self.loading = false;
        self.progress = 1.0;
        let url_changed = self.url.as_deref() != Some(url);
        self.url = Some(url.to_string());

        self.notify(&[ObservedProperty::Loading, ObservedProperty::EstimatedProgress]);
        if url_changed {
            self.notify(&[ObservedProperty::Url]);
        }
    }

    pub fn title_changed(&mut self, title: String) {
        self.title = Some(title);
        self.notify(&[ObservedProperty::Title]);
    }

    /// A stop request doesn't always produce a finished event.
    pub fn stopped(&mut self) {
        if self.loading {
            self.loading = false;
            self.notify(&[ObservedProperty::Loading]);
        }
    }

    pub fn request(&mut self, navigation: PendingNavigation) -> bool {
        self.history.request(navigation)
    }
}

impl PropertySource for ViewState {
    fn is_loading(&self) -> bool {
        self.loading
    }

    fn estimated_progress(&self) -> f64 {
        self.progress
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn url(&self) -> Option<String> {
        self.url.clone()
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    state: Arc<Mutex<ViewState>>,
    tab: u32,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let started = matches!(event, wry::PageLoadEvent::Started);
        debug!(tab, started, url = %url, "page load");
        if let Ok(mut state) = state.lock() {
            if started {
                state.page_started(&url);
            } else {
                state.page_finished(&url);
            }
        }
    })
}

pub(super) fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    state: Arc<Mutex<ViewState>>,
    tab: u32,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(tab, title = %title, "title changed");
        if let Ok(mut state) = state.lock() {
            state.title_changed(title);
        }
    })
}
