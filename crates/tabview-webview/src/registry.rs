//! Tab id → bridge map for one host window.

use std::collections::HashMap;
use std::sync::Arc;

use tabview_common::{BridgeError, Rect, Result};
use tabview_config::{PlatformProfile, TabviewConfig, ViewSettings};
use tracing::{debug, warn};

use crate::bridge::ViewPropertyBridge;
use crate::platform;
use crate::sink::EventSink;
use crate::view::NativeView;

/// Owns every live tab bridge. Bridges share one event sink and take
/// their configuration snapshot from the registry at creation.
pub struct TabRegistry<V: NativeView> {
    bridges: HashMap<u32, ViewPropertyBridge<V>>,
    sink: Arc<dyn EventSink>,
    settings: ViewSettings,
    profile: PlatformProfile,
    focused: Option<u32>,
}

impl<V: NativeView> TabRegistry<V> {
    pub fn new(sink: Arc<dyn EventSink>, config: &TabviewConfig) -> Self {
        Self {
            bridges: HashMap::new(),
            sink,
            settings: config.view.clone(),
            profile: config.platform.profile.resolve(),
            focused: None,
        }
    }

    /// Wrap `view` as tab `tab` at `frame` (toolkit coordinates).
    pub fn create_tab(&mut self, tab: u32, view: V, frame: Rect) -> Result<()> {
        if self.bridges.contains_key(&tab) {
            return Err(BridgeError::DuplicateTab(tab));
        }
        let bridge = ViewPropertyBridge::new(
            view,
            frame,
            self.settings.clone(),
            platform::for_profile(self.profile),
            tab,
            Arc::clone(&self.sink),
        )?;
        self.bridges.insert(tab, bridge);
        debug!(tab, count = self.bridges.len(), "tab registered");
        Ok(())
    }

    pub fn get(&self, tab: u32) -> Option<&ViewPropertyBridge<V>> {
        self.bridges.get(&tab)
    }

    pub fn get_mut(&mut self, tab: u32) -> Option<&mut ViewPropertyBridge<V>> {
        self.bridges.get_mut(&tab)
    }

    /// Like [`get_mut`](Self::get_mut) but with an `UnknownTab` error.
    pub fn bridge_mut(&mut self, tab: u32) -> Result<&mut ViewPropertyBridge<V>> {
        self.bridges.get_mut(&tab).ok_or(BridgeError::UnknownTab(tab))
    }

    /// Focus `tab` and re-emit its state for the host's toolbar.
    pub fn switch_to(&mut self, tab: u32) -> Result<()> {
        let bridge = self.bridges.get(&tab).ok_or(BridgeError::UnknownTab(tab))?;
        bridge.resync_tab_state()?;
        self.focused = Some(tab);
        debug!(tab, "switched tab");
        Ok(())
    }

    pub fn focused(&self) -> Option<u32> {
        self.focused
    }

    /// Dispose and drop a tab. Returns whether it existed.
    pub fn dispose(&mut self, tab: u32) -> bool {
        let Some(mut bridge) = self.bridges.remove(&tab) else {
            return false;
        };
        match bridge.dispose() {
            Ok(()) | Err(BridgeError::AlreadyDisposed { .. }) => {}
            Err(e) => warn!(tab, error = %e, "dispose failed"),
        }
        if self.focused == Some(tab) {
            self.focused = None;
        }
        debug!(tab, "tab removed");
        true
    }

    pub fn dispose_all(&mut self) {
        for tab in self.active_tabs() {
            self.dispose(tab);
        }
    }

    /// Live tab ids, ascending.
    pub fn active_tabs(&self) -> Vec<u32> {
        let mut tabs: Vec<u32> = self.bridges.keys().copied().collect();
        tabs.sort_unstable();
        tabs
    }

    pub fn count(&self) -> usize {
        self.bridges.len()
    }

    /// Flush pending property notifications of every tab, lowest id first.
    pub fn process_notifications(&mut self) -> usize {
        let mut sent = 0;
        for tab in self.active_tabs() {
            if let Some(bridge) = self.bridges.get_mut(&tab) {
                sent += bridge.process_notifications();
            }
        }
        sent
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn profile(&self) -> PlatformProfile {
        self.profile
    }
}

impl<V: NativeView> Drop for TabRegistry<V> {
    fn drop(&mut self) {
        if !self.bridges.is_empty() {
            debug!(count = self.bridges.len(), "disposing remaining tabs");
            self.dispose_all();
        }
    }
}
