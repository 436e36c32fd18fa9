//! Per-toolkit behavior a bridge delegates to.
//!
//! The bridge logic is identical everywhere; only coordinate origin,
//! offscreen capture, scoped file access, and how init-time settings reach
//! the view differ between toolkits.

mod appkit;
mod composited;
mod scope;
mod uikit;

use std::fmt;
use std::path::Path;

use tabview_common::{BridgeError, CoordinateOrigin, Rect, Result};
use tabview_config::{PlatformProfile, ViewSettings};

use crate::view::{NativeView, Snapshot};

pub use appkit::AppKit;
pub use composited::Composited;
pub use scope::resolve_scoped;
pub use uikit::UiKit;

/// Toolkit capability set.
pub trait Platform: fmt::Debug {
    fn profile(&self) -> PlatformProfile;

    /// Where y = 0 sits in the parent's content area.
    fn origin(&self) -> CoordinateOrigin;

    /// Convert a host viewport (top-left origin) into the frame the
    /// toolkit expects inside a parent of `parent_content_height`.
    fn native_frame(&self, viewport: Rect, parent_content_height: f64) -> Rect {
        to_native_frame(viewport, parent_content_height, self.origin())
    }

    /// Offscreen render of the view's contents at its native scale.
    fn capture(&self, _view: &dyn NativeView) -> Result<Snapshot> {
        Err(BridgeError::UnsupportedOperation(format!(
            "offscreen capture is not available on {:?}",
            self.profile()
        )))
    }

    /// Load `file` after checking it resolves inside `read_access_root`.
    fn load_local_file(
        &self,
        view: &mut dyn NativeView,
        file: &Path,
        read_access_root: &Path,
        _settings: &ViewSettings,
    ) -> Result<()> {
        let (file, root) = resolve_scoped(file, read_access_root)?;
        view.load_file(&file, &root)
    }

    /// Push the init-time settings the toolkit can change after creation.
    fn apply_configuration(&self, view: &mut dyn NativeView, settings: &ViewSettings)
        -> Result<()>;
}

/// Build the capability object for a profile. `Auto` is resolved first.
pub fn for_profile(profile: PlatformProfile) -> Box<dyn Platform> {
    match profile.resolve() {
        PlatformProfile::AppKit => Box::new(AppKit),
        PlatformProfile::UiKit => Box::new(UiKit),
        PlatformProfile::Composited | PlatformProfile::Auto => Box::new(Composited),
    }
}

/// Translate a top-left viewport into `origin` coordinates.
///
/// Bottom-left parents measure y upward, so the view's bottom edge is
/// `parent - y - height` above the parent's bottom.
pub fn to_native_frame(
    viewport: Rect,
    parent_content_height: f64,
    origin: CoordinateOrigin,
) -> Rect {
    match origin {
        CoordinateOrigin::TopLeft => viewport,
        CoordinateOrigin::BottomLeft => Rect {
            y: parent_content_height - viewport.height - viewport.y,
            ..viewport
        },
    }
}
