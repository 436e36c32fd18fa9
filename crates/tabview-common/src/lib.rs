pub mod errors;
pub mod logging;
pub mod types;

pub use errors::{BridgeError, ConfigError};
pub use types::{CoordinateOrigin, Rect};

pub type Result<T> = std::result::Result<T, BridgeError>;
