use tabview_common::{CoordinateOrigin, Result};
use tabview_config::{PlatformProfile, ViewSettings};

use super::Platform;
use crate::view::{NativeView, Snapshot};

/// Mobile webview hosted in a scroll view.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiKit;

impl Platform for UiKit {
    fn profile(&self) -> PlatformProfile {
        PlatformProfile::UiKit
    }

    fn origin(&self) -> CoordinateOrigin {
        CoordinateOrigin::TopLeft
    }

    fn capture(&self, view: &dyn NativeView) -> Result<Snapshot> {
        view.render_snapshot(view.scale_factor())
    }

    fn apply_configuration(&self, view: &mut dyn NativeView, settings: &ViewSettings) -> Result<()> {
        view.set_scroll_bounce(settings.bounces)
    }
}
