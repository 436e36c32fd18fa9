//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod platform;
mod view;

pub use logging::*;
pub use platform::*;
pub use view::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for tab bridges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabviewConfig {
    pub view: ViewSettings,
    pub platform: PlatformSettings,
    pub logging: LoggingConfig,
}
