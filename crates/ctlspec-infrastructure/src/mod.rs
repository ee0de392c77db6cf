//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns of the harness.
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-backed `HarnessConfig` loading and validation |
//! | [`constants`] | Configuration file names and logging defaults |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Doubles
//! | Module | Description |
//! |--------|-------------|
//! | [`doubles`] | In-memory `DoubleFactory` with explicit stub tables |

pub mod config;
pub mod constants;
pub mod doubles;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, HarnessConfig, LoggingConfig};
pub use doubles::InMemoryDoubleFactory;
pub use error_ext::ErrorContext;
