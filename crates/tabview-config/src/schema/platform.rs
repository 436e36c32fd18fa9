use serde::{Deserialize, Serialize};

/// Which toolkit conventions a tab follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformProfile {
    /// Pick from the compilation target.
    #[default]
    Auto,
    /// View parented in an unflipped AppKit content view (bottom-left origin).
    AppKit,
    /// UIKit scroll view (top-left origin, offscreen capture available).
    UiKit,
    /// Child webview composited by `wry` (top-left origin on every OS).
    Composited,
}

impl PlatformProfile {
    /// Resolve `Auto` to a concrete profile for the current target.
    ///
    /// `wry` already presents a top-left coordinate space for child
    /// webviews on macOS, so desktop targets resolve to `Composited`.
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto if cfg!(target_os = "ios") => Self::UiKit,
            Self::Auto => Self::Composited,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    pub profile: PlatformProfile,
}
