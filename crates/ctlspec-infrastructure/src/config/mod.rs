//! Configuration
//!
//! `HarnessConfig` is assembled by Figment from defaults, an optional TOML
//! file and `CTLSPEC__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{HarnessConfig, LoggingConfig};
