use std::path::{Path, PathBuf};

use tabview_common::{BridgeError, Result};

/// Canonicalize `file` and `root` and check that the file lies inside the
/// root. Symlinks and `..` are resolved before the check.
///
/// Returns the canonical `(file, root)` pair.
pub fn resolve_scoped(file: &Path, root: &Path) -> Result<(PathBuf, PathBuf)> {
    let denied = || BridgeError::AccessDenied {
        path: file.to_path_buf(),
        root: root.to_path_buf(),
    };

    let canonical_root = std::fs::canonicalize(root).map_err(|_| denied())?;
    let canonical_file = std::fs::canonicalize(file).map_err(|_| denied())?;
    if !canonical_file.starts_with(&canonical_root) || !canonical_file.is_file() {
        tracing::warn!(
            file = %file.display(),
            root = %root.display(),
            "local file outside read access root"
        );
        return Err(denied());
    }

    Ok((canonical_file, canonical_root))
}
