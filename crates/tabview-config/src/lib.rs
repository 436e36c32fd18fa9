//! Configuration for tab bridges.
//!
//! TOML-based, with defaults for every field so partial configs work.
//!
//! ```rust,no_run
//! use tabview_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    LoggingConfig, PlatformProfile, PlatformSettings, TabviewConfig, ViewSettings,
    CONFIG_SCHEMA_VERSION,
};

use tabview_common::ConfigError;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<TabviewConfig, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &TabviewConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
