//! Operator configuration
//!
//! Layered settings: built-in defaults, then an optional file, then environment variables.

mod loader;
mod types;

pub use loader::{ConfigLoader, ENV_PREFIX};
pub use types::{BackoffSettings, LoggingSettings, OperatorSettings};
