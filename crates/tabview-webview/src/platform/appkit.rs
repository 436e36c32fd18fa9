use std::path::Path;

use tabview_common::{BridgeError, CoordinateOrigin, Result};
use tabview_config::{PlatformProfile, ViewSettings};
use tracing::debug;

use super::{resolve_scoped, Platform};
use crate::view::NativeView;

/// Desktop webview inside an unflipped AppKit content view.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppKit;

impl Platform for AppKit {
    fn profile(&self) -> PlatformProfile {
        PlatformProfile::AppKit
    }

    fn origin(&self) -> CoordinateOrigin {
        CoordinateOrigin::BottomLeft
    }

    fn load_local_file(
        &self,
        view: &mut dyn NativeView,
        file: &Path,
        read_access_root: &Path,
        settings: &ViewSettings,
    ) -> Result<()> {
        // Scoped read access needs 10.11+.
        if !settings.file_read_access {
            return Err(BridgeError::UnsupportedOperation(
                "scoped file read access is not available on this host".into(),
            ));
        }
        let (file, root) = resolve_scoped(file, read_access_root)?;
        view.load_file(&file, &root)
    }

    fn apply_configuration(&self, _view: &mut dyn NativeView, settings: &ViewSettings) -> Result<()> {
        if !settings.bounces {
            debug!("scroll bounce setting ignored on desktop");
        }
        Ok(())
    }
}
