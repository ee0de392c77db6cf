//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::{HarnessConfig, LoggingConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use ctlspec_domain::HarnessSettings;
use ctlspec_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `HarnessConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `CTLSPEC__HARNESS__LOGIN_PATH`)
    pub fn load(&self) -> Result<HarnessConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(HarnessConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let config: HarnessConfig = figment
            .extract()
            .context("Failed to extract configuration")?;

        validate_harness_config(&config)?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &HarnessConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate the harness configuration
fn validate_harness_config(config: &HarnessConfig) -> Result<()> {
    validate_harness_settings(&config.harness)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_harness_settings(settings: &HarnessSettings) -> Result<()> {
    if settings.placeholder_id.trim().is_empty() {
        return Err(Error::configuration("Placeholder id cannot be empty"));
    }
    if settings.actor_model.trim().is_empty() {
        return Err(Error::configuration("Actor model cannot be empty"));
    }
    if settings.actor_param.trim().is_empty() {
        return Err(Error::configuration("Actor parameter cannot be empty"));
    }
    for (name, path) in [
        ("Login path", &settings.login_path),
        ("Admin redirect path", &settings.admin_redirect_path),
    ] {
        if !path.starts_with('/') {
            return Err(Error::configuration(format!(
                "{name} must start with '/': {path}"
            )));
        }
    }
    if settings.first_fixture_id == 0 {
        return Err(Error::configuration("First fixture id cannot be 0"));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: HarnessConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::default(),
        }
    }

    /// Set the harness settings
    pub fn with_harness(mut self, harness: HarnessSettings) -> Self {
        self.config.harness = harness;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set the login redirect target
    pub fn with_login_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.harness.login_path = path.into();
        self
    }

    /// Set the first id of the fixture sequence
    pub fn with_first_fixture_id(mut self, id: u64) -> Self {
        self.config.harness.first_fixture_id = id;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<HarnessConfig> {
        validate_harness_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
