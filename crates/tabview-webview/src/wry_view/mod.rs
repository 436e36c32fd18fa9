//! `NativeView` over a `wry` child webview.
//!
//! wry reports page loads and title changes through builder callbacks; those
//! update a shared [`ViewState`] and queue each change, with its new value,
//! for the bridge.
//! Back/forward availability comes from a [`NavigationHistory`] rebuilt from
//! committed loads, since wry has no history API.

mod handlers;
mod history;

use std::path::Path;
use std::sync::{Arc, Mutex};

use tabview_common::{BridgeError, Rect, Result};
use tabview_config::ViewSettings;
use tracing::{debug, warn};
use url::Url;
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebView, WebViewBuilder};

use crate::observation::ObservationQueue;
use crate::property::{ObservedProperty, PropertySource};
use crate::script::{parse_envelope, wrap_script, RejectedScript, ScriptCompletion};
use crate::view::{NativeView, Snapshot};

pub use handlers::ViewState;
pub use history::{NavigationHistory, PendingNavigation};

/// Disables rubber-band overscroll. wry has no switch for it, so the page
/// is styled at document start.
const NO_OVERSCROLL_SCRIPT: &str = r#"
(function() {
  var apply = function() {
    document.documentElement.style.overscrollBehavior = 'none';
    if (document.body) document.body.style.overscrollBehavior = 'none';
  };
  apply();
  document.addEventListener('DOMContentLoaded', apply);
})();
"#;

const BLANK_PAGE: &str = "<html><body></body></html>";

/// A `wry` webview parented into a host window.
pub struct WryView {
    webview: WebView,
    state: Arc<Mutex<ViewState>>,
    tab: u32,
    bounces: bool,
    scale_factor: f64,
}

impl WryView {
    /// Build a child webview of `window` at `frame` with `settings` baked in.
    pub fn build_as_child<W: HasWindowHandle>(
        window: &W,
        tab: u32,
        frame: Rect,
        settings: &ViewSettings,
    ) -> Result<Self> {
        let state = Arc::new(Mutex::new(ViewState::default()));

        let mut builder = WebViewBuilder::new()
            .with_bounds(to_wry_rect(frame))
            .with_transparent(settings.transparent)
            .with_devtools(settings.devtools)
            .with_clipboard(settings.clipboard)
            .with_autoplay(settings.autoplay)
            .with_focused(false);

        if !settings.bounces {
            builder = builder.with_initialization_script(NO_OVERSCROLL_SCRIPT);
        }

        if let Some(ua) = &settings.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = handlers::attach_page_load_handler(builder, Arc::clone(&state), tab);
        builder = handlers::attach_title_handler(builder, Arc::clone(&state), tab);
        builder = builder.with_html(BLANK_PAGE);

        let webview = builder.build_as_child(window).map_err(platform_error)?;
        debug!(tab, transparent = settings.transparent, "wry webview created");

        Ok(Self {
            webview,
            state,
            tab,
            bounces: settings.bounces,
            scale_factor: settings.scale_factor,
        })
    }

    pub fn inner(&self) -> &WebView {
        &self.webview
    }

    fn read<R: Default>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        self.state.lock().map(|s| f(&s)).unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
    }

    fn request_navigation(&self, navigation: PendingNavigation) -> bool {
        self.state
            .lock()
            .map(|mut s| s.request(navigation))
            .unwrap_or(false)
    }

    fn run_script(&self, js: &str) -> Result<()> {
        self.webview.evaluate_script(js).map_err(platform_error)
    }
}

impl PropertySource for WryView {
    fn is_loading(&self) -> bool {
        self.read(|s| s.is_loading())
    }

    fn estimated_progress(&self) -> f64 {
        self.read(|s| s.estimated_progress())
    }

    fn title(&self) -> Option<String> {
        self.read(|s| s.title())
    }

    fn url(&self) -> Option<String> {
        self.read(|s| s.url())
    }

    fn can_go_back(&self) -> bool {
        self.read(|s| s.can_go_back())
    }

    fn can_go_forward(&self) -> bool {
        self.read(|s| s.can_go_forward())
    }
}

impl NativeView for WryView {
    fn subscribe(&mut self, properties: &[ObservedProperty], queue: ObservationQueue) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| BridgeError::Platform("webview state poisoned".into()))?;
        state.subscribe(properties, queue);
        Ok(())
    }

    fn unsubscribe(&mut self, properties: &[ObservedProperty]) {
        self.update(|s| s.unsubscribe(properties));
    }

    fn load_url(&mut self, url: &Url) -> Result<()> {
        self.webview.load_url(url.as_str()).map_err(platform_error)
    }

    fn load_html(&mut self, html: &str) -> Result<()> {
        self.webview.load_html(html).map_err(platform_error)
    }

    fn load_file(&mut self, file: &Path, _read_access_root: &Path) -> Result<()> {
        let url = Url::from_file_path(file).map_err(|()| {
            BridgeError::Platform(format!("not an absolute path: {}", file.display()))
        })?;
        self.webview.load_url(url.as_str()).map_err(platform_error)
    }

    fn evaluate_script(&mut self, js: &str) -> Result<()> {
        self.run_script(js)
    }

    fn evaluate_script_with_completion(
        &mut self,
        js: &str,
        completion: ScriptCompletion,
    ) -> std::result::Result<(), RejectedScript> {
        let slot = Arc::new(Mutex::new(Some(completion)));
        let engine_slot = Arc::clone(&slot);

        let result = self
            .webview
            .evaluate_script_with_callback(&wrap_script(js), move |raw| {
                let completion = engine_slot.lock().ok().and_then(|mut c| c.take());
                if let Some(completion) = completion {
                    completion.complete(parse_envelope(&raw));
                }
            });

        if let Err(e) = result {
            warn!(tab = self.tab, error = %e, "script evaluation rejected");
            let completion = slot.lock().ok().and_then(|mut c| c.take());
            if let Some(completion) = completion {
                return Err(RejectedScript::new(
                    BridgeError::Evaluation(e.to_string()),
                    completion,
                ));
            }
        }
        Ok(())
    }

    fn set_frame(&mut self, frame: Rect) -> Result<()> {
        self.webview
            .set_bounds(to_wry_rect(frame))
            .map_err(platform_error)
    }

    fn go_back(&mut self) -> Result<()> {
        if !self.request_navigation(PendingNavigation::Back) {
            debug!(tab = self.tab, "no entry to go back to");
            return Ok(());
        }
        self.run_script("history.back()")
    }

    fn go_forward(&mut self) -> Result<()> {
        if !self.request_navigation(PendingNavigation::Forward) {
            debug!(tab = self.tab, "no entry to go forward to");
            return Ok(());
        }
        self.run_script("history.forward()")
    }

    fn reload(&mut self) -> Result<()> {
        self.request_navigation(PendingNavigation::Reload);
        self.run_script("location.reload()")
    }

    fn stop_loading(&mut self) -> Result<()> {
        self.run_script("window.stop()")?;
        self.update(ViewState::stopped);
        Ok(())
    }

    fn set_scroll_bounce(&mut self, bounces: bool) -> Result<()> {
        if bounces == self.bounces {
            return Ok(());
        }
        Err(BridgeError::UnsupportedOperation(
            "scroll bounce is fixed when the webview is built".into(),
        ))
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn render_snapshot(&self, _scale: f64) -> Result<Snapshot> {
        Err(BridgeError::UnsupportedOperation(
            "wry has no offscreen snapshot".into(),
        ))
    }
}

/// Convert a frame to wry bounds (logical pixels, top-left origin).
pub fn to_wry_rect(frame: Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(frame.x, frame.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(frame.width, frame.height)),
    }
}

fn platform_error(e: wry::Error) -> BridgeError {
    BridgeError::Platform(e.to_string())
}
