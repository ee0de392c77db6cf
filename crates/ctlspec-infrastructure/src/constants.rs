//! Infrastructure layer constants
//!
//! Harness defaults that belong to the domain live in
//! `ctlspec_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "ctlspec.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "ctlspec";

/// Environment variable prefix for configuration (`CTLSPEC__HARNESS__LOGIN_PATH`)
pub const CONFIG_ENV_PREFIX: &str = "CTLSPEC";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "CTLSPEC_LOG";

/// Log file stem used when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "ctlspec";

// ============================================================================
// DOUBLE FACTORY CONSTANTS
// ============================================================================

/// Name reported by the in-memory double factory
pub const IN_MEMORY_FACTORY_NAME: &str = "in-memory";

/// Attribute fixing a double's id
pub const ID_ATTRIBUTE: &str = "id";
