use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures reported by a tab bridge back to the host.
///
/// None of these abort the process; every host-facing operation returns
/// them as a `Result` or, for callback evaluation, as a `success: false`
/// callback event.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("access denied: {path} is not readable under {root}")]
    AccessDenied { path: PathBuf, root: PathBuf },

    #[error("script evaluation failed: {0}")]
    Evaluation(String),

    #[error("tab {tab} has been disposed")]
    Disposed { tab: u32 },

    #[error("tab {tab} was already disposed")]
    AlreadyDisposed { tab: u32 },

    #[error("unknown tab: {0}")]
    UnknownTab(u32),

    #[error("tab {0} already exists")]
    DuplicateTab(u32),

    #[error("platform error: {0}")]
    Platform(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// Short machine-readable name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::UnsupportedOperation(_) => "unsupported_operation",
            Self::AccessDenied { .. } => "access_denied",
            Self::Evaluation(_) => "evaluation",
            Self::Disposed { .. } => "disposed",
            Self::AlreadyDisposed { .. } => "already_disposed",
            Self::UnknownTab(_) => "unknown_tab",
            Self::DuplicateTab(_) => "duplicate_tab",
            Self::Platform(_) => "platform",
            Self::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("view.scale_factor out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: view.scale_factor out of range"
        );
    }

    #[test]
    fn invalid_url_display() {
        let err = BridgeError::InvalidUrl {
            url: "not a url".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid url 'not a url': relative URL without a base"
        );
        assert_eq!(err.kind(), "invalid_url");
    }

    #[test]
    fn access_denied_display() {
        let err = BridgeError::AccessDenied {
            path: PathBuf::from("/etc/passwd"),
            root: PathBuf::from("/srv/www"),
        };
        assert_eq!(
            err.to_string(),
            "access denied: /etc/passwd is not readable under /srv/www"
        );
    }

    #[test]
    fn lifecycle_errors_carry_tab() {
        assert_eq!(
            BridgeError::Disposed { tab: 3 }.to_string(),
            "tab 3 has been disposed"
        );
        assert_eq!(
            BridgeError::AlreadyDisposed { tab: 3 }.to_string(),
            "tab 3 was already disposed"
        );
        assert_eq!(BridgeError::UnknownTab(9).to_string(), "unknown tab: 9");
        assert_eq!(BridgeError::DuplicateTab(9).to_string(), "tab 9 already exists");
    }

    #[test]
    fn bridge_error_from_config() {
        let err: BridgeError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, BridgeError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn other_variants_display() {
        let err = BridgeError::UnsupportedOperation("offscreen capture".into());
        assert_eq!(err.to_string(), "unsupported operation: offscreen capture");

        let err = BridgeError::Evaluation("ReferenceError: x is not defined".into());
        assert_eq!(
            err.to_string(),
            "script evaluation failed: ReferenceError: x is not defined"
        );

        let err = BridgeError::Platform("webview gone".into());
        assert_eq!(err.to_string(), "platform error: webview gone");
    }
}
