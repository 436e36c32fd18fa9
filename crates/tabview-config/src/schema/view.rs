//! Settings captured into each tab at creation time.

use serde::{Deserialize, Serialize};

/// Init-time view settings.
///
/// A copy is taken when a tab is created and never changes afterwards;
/// editing the config only affects tabs created later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Rubber-band bounce when scrolling past the content edge (mobile only).
    pub bounces: bool,
    /// Transparent webview background.
    pub transparent: bool,
    /// Enable the inspector. Defaults to on in debug builds.
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    pub clipboard: bool,
    pub autoplay: bool,
    /// Whether the OS can grant scoped read access for local file loads.
    /// Turn off on AppKit hosts older than 10.11.
    pub file_read_access: bool,
    /// Native display scale used for snapshots (valid range: 0.5-4.0).
    pub scale_factor: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            bounces: true,
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            clipboard: true,
            autoplay: false,
            file_read_access: true,
            scale_factor: 1.0,
        }
    }
}
