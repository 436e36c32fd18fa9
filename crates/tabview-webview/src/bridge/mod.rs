//! ViewPropertyBridge: one native webview mirrored to the host.
//!
//! The bridge owns the view, subscribes to its observable properties once
//! at construction, and turns every change into a `WebView.OnPropertyChange`
//! event. Host commands are forwarded to the view through the platform's
//! capability object so coordinate flips and capture limits stay out of
//! the bridge itself.

use std::marker::PhantomData;
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tabview_common::{BridgeError, Rect, Result};
use tabview_config::ViewSettings;
use tracing::{debug, warn};
use url::Url;

use crate::events::{ChangeRecord, PROPERTY_CHANGE_EVENT};
use crate::observation::{ObservationQueue, ObservationState};
use crate::platform::Platform;
use crate::property::ObservedProperty;
use crate::script::ScriptCompletion;
use crate::sink::EventSink;
use crate::view::{NativeView, Snapshot};

/// Resync order: url and title when non-empty, then the always-present flags.
const RESYNC_ORDER: [ObservedProperty; 5] = [
    ObservedProperty::Url,
    ObservedProperty::Title,
    ObservedProperty::CanGoBack,
    ObservedProperty::CanGoForward,
    ObservedProperty::Loading,
];

/// A single browser tab.
///
/// Not `Send`: every call happens on the thread that created it. Other
/// threads go through [`crate::dispatch::CommandSender`].
pub struct ViewPropertyBridge<V: NativeView> {
    tab: u32,
    view: V,
    /// Snapshot taken at creation; never changes.
    configuration: ViewSettings,
    platform: Box<dyn Platform>,
    sink: Arc<dyn EventSink>,
    queue: ObservationQueue,
    state: ObservationState,
    /// Cleared on dispose so late script completions are dropped.
    alive: Arc<AtomicBool>,
    _ui_thread: PhantomData<Rc<()>>,
}

impl<V: NativeView> ViewPropertyBridge<V> {
    /// Wrap `view`, apply `configuration`, place it at `frame` (toolkit
    /// coordinates) and start observing.
    pub fn new(
        mut view: V,
        frame: Rect,
        configuration: ViewSettings,
        platform: Box<dyn Platform>,
        tab: u32,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        platform.apply_configuration(&mut view, &configuration)?;
        view.set_frame(frame)?;

        let mut bridge = Self {
            tab,
            view,
            configuration,
            platform,
            sink,
            queue: ObservationQueue::new(),
            state: ObservationState::Unobserved,
            alive: Arc::new(AtomicBool::new(true)),
            _ui_thread: PhantomData,
        };
        bridge.start_observing()?;

        debug!(
            tab,
            platform = ?bridge.platform.profile(),
            "tab bridge created"
        );
        Ok(bridge)
    }

    fn start_observing(&mut self) -> Result<()> {
        if self.state != ObservationState::Unobserved {
            return Ok(());
        }
        self.view
            .subscribe(&ObservedProperty::ALL, self.queue.clone())?;
        self.state = ObservationState::Observing;
        Ok(())
    }

    fn ensure_live(&self, operation: &str) -> Result<()> {
        if self.state == ObservationState::Disposed {
            debug!(tab = self.tab, operation, "command on disposed tab");
            return Err(BridgeError::Disposed { tab: self.tab });
        }
        Ok(())
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    pub fn load_url(&mut self, url: &str) -> Result<()> {
        self.ensure_live("load_url")?;
        let parsed = Url::parse(url.trim()).map_err(|e| BridgeError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        debug!(tab = self.tab, url = %parsed, "loading url");
        self.view.load_url(&parsed)
    }

    pub fn load_html(&mut self, html: &str) -> Result<()> {
        self.ensure_live("load_html")?;
        debug!(tab = self.tab, len = html.len(), "loading inline html");
        self.view.load_html(html)
    }

    /// Load `file`, granting read access to everything under
    /// `read_access_root`. The file must resolve inside the root.
    pub fn load_local_file(&mut self, file: &Path, read_access_root: &Path) -> Result<()> {
        self.ensure_live("load_local_file")?;
        debug!(
            tab = self.tab,
            file = %file.display(),
            root = %read_access_root.display(),
            "loading local file"
        );
        self.platform.load_local_file(
            &mut self.view,
            file,
            read_access_root,
            &self.configuration,
        )
    }

    pub fn go_back(&mut self) -> Result<()> {
        self.ensure_live("go_back")?;
        self.view.go_back()
    }

    pub fn go_forward(&mut self) -> Result<()> {
        self.ensure_live("go_forward")?;
        self.view.go_forward()
    }

    pub fn reload(&mut self) -> Result<()> {
        self.ensure_live("reload")?;
        self.view.reload()
    }

    pub fn stop_loading(&mut self) -> Result<()> {
        self.ensure_live("stop_loading")?;
        self.view.stop_loading()
    }

    // =========================================================================
    // SCRIPTS
    // =========================================================================

    /// Evaluate `js` and ignore the result.
    pub fn evaluate_script(&mut self, js: &str) -> Result<()> {
        self.ensure_live("evaluate_script")?;
        self.view.evaluate_script(js)
    }

    /// Evaluate `js` and report the outcome as one `WebView.OnCallback`
    /// event named `callback_id`.
    ///
    /// Script errors are delivered through the event, not returned.
    pub fn evaluate_script_with_callback(&mut self, js: &str, callback_id: &str) -> Result<()> {
        self.ensure_live("evaluate_script_with_callback")?;
        let completion = ScriptCompletion::new(
            callback_id,
            self.tab,
            Arc::clone(&self.sink),
            Arc::clone(&self.alive),
        );
        if let Err(rejected) = self.view.evaluate_script_with_completion(js, completion) {
            warn!(
                tab = self.tab,
                callback = callback_id,
                error = %rejected.error,
                "script rejected by engine"
            );
            rejected.report();
        }
        Ok(())
    }

    // =========================================================================
    // LAYOUT & CAPTURE
    // =========================================================================

    /// Place the view at `viewport` (host coordinates, top-left origin)
    /// inside a parent whose content area is `parent_content_height` tall.
    ///
    /// Returns the frame handed to the toolkit.
    pub fn set_position_and_size(
        &mut self,
        viewport: Rect,
        parent_content_height: f64,
    ) -> Result<Rect> {
        self.ensure_live("set_position_and_size")?;
        let frame = self.platform.native_frame(viewport, parent_content_height);
        self.view.set_frame(frame)?;
        Ok(frame)
    }

    /// Render the visible contents at the view's native scale.
    pub fn capture_snapshot(&self) -> Result<Snapshot> {
        self.ensure_live("capture_snapshot")?;
        self.platform.capture(&self.view)
    }

    // =========================================================================
    // PROPERTY EVENTS
    // =========================================================================

    /// Re-emit the state the host needs after switching to this tab.
    pub fn resync_tab_state(&self) -> Result<()> {
        self.ensure_live("resync_tab_state")?;
        for property in RESYNC_ORDER {
            if let Some(value) = property.observed_value(&self.view) {
                self.emit(property, value);
            }
        }
        Ok(())
    }

    /// Emit every observed property, absent values as `null`.
    pub fn enumerate_properties(&self) -> Result<()> {
        self.ensure_live("enumerate_properties")?;
        for property in ObservedProperty::ALL {
            self.emit(property, property.current_value(&self.view));
        }
        Ok(())
    }

    /// Emit one change event per pending notification, carrying the value
    /// recorded when the change happened. Returns how many events were sent.
    pub fn process_notifications(&mut self) -> usize {
        let pending = self.queue.drain();
        if self.state != ObservationState::Observing {
            return 0;
        }

        let mut sent = 0;
        for change in pending {
            if let Some(value) = change.value {
                self.emit(change.property, value);
                sent += 1;
            }
        }
        sent
    }

    fn emit(&self, property: ObservedProperty, value: Value) {
        let record = ChangeRecord::new(property, value, self.tab);
        debug!(tab = self.tab, prop = property.prop_name(), "property change");
        self.sink.send_event(PROPERTY_CHANGE_EVENT, &record.to_json());
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Stop observing and cut off pending callbacks. Only the first call
    /// succeeds.
    pub fn dispose(&mut self) -> Result<()> {
        if self.state == ObservationState::Disposed {
            return Err(BridgeError::AlreadyDisposed { tab: self.tab });
        }
        self.release();
        debug!(tab = self.tab, "tab disposed");
        Ok(())
    }

    fn release(&mut self) {
        self.alive.store(false, Ordering::Release);
        if self.state == ObservationState::Observing {
            self.view.unsubscribe(&ObservedProperty::ALL);
        }
        self.queue.drain();
        self.state = ObservationState::Disposed;
    }

    pub fn tab(&self) -> u32 {
        self.tab
    }

    pub fn state(&self) -> ObservationState {
        self.state
    }

    pub fn is_disposed(&self) -> bool {
        self.state == ObservationState::Disposed
    }

    pub fn configuration(&self) -> &ViewSettings {
        &self.configuration
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

impl<V: NativeView> Drop for ViewPropertyBridge<V> {
    // Runs before the fields drop, so the view is still alive here.
    fn drop(&mut self) {
        if self.state != ObservationState::Disposed {
            self.release();
        }
    }
}

impl<V: NativeView> std::fmt::Debug for ViewPropertyBridge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewPropertyBridge")
            .field("tab", &self.tab)
            .field("state", &self.state)
            .field("platform", &self.platform)
            .finish()
    }
}
