use tabview_common::{CoordinateOrigin, Result};
use tabview_config::{PlatformProfile, ViewSettings};

use super::Platform;
use crate::view::NativeView;

/// Child webview composited by `wry` into a host window.
///
/// Bounds are top-left on every OS and there is no offscreen render.
/// Bounce is fixed when the webview is built, so applying it only checks
/// that the view agrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Composited;

impl Platform for Composited {
    fn profile(&self) -> PlatformProfile {
        PlatformProfile::Composited
    }

    fn origin(&self) -> CoordinateOrigin {
        CoordinateOrigin::TopLeft
    }

    fn apply_configuration(&self, view: &mut dyn NativeView, settings: &ViewSettings) -> Result<()> {
        view.set_scroll_bounce(settings.bounces)
    }
}
