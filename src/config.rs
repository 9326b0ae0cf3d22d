//! Configuration for the key generator tool.
//!
//! Configuration is loaded from multiple sources with the following
//! precedence:
//! 1. Environment variables (highest priority)
//! 2. `config.toml` file
//! 3. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `AURA_DEFAULT_CUSTOMER_ID` - Customer id used when none is given
//! - `AURA_BATCH_START` - First customer number in batch mode
//! - `AURA_LOGGING_ENABLED` - Enable logging
//! - `AURA_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
//!
//! The wire format itself (prefix, lengths, secret) is deliberately *not*
//! configurable: it must match the validating plugin byte for byte.

use config::Config;
use serde::Deserialize;
use std::env;
use std::sync::OnceLock;

use crate::errors::{LicenseError, LicenseResult};

/// Global configuration singleton.
static CONFIG: OnceLock<AuraConfig> = OnceLock::new();

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuraConfig {
    /// Key generator defaults
    pub generator: GeneratorConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Defaults for the key generator CLI.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Customer id used when the caller does not supply one
    pub default_customer_id: String,
    /// First customer number in batch mode
    pub batch_start: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_customer_id: "0001".to_string(),
            batch_start: 1,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl AuraConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. `config.toml` file (optional)
    /// 3. Environment variables
    fn load() -> LicenseResult<Self> {
        let builder = Config::builder()
            .set_default("generator.default_customer_id", "0001")
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?
            .set_default("generator.batch_start", 1)
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?
            .set_default("logging.enabled", false)
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?
            .set_default("logging.level", "info")
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?
            // Load from config.toml (optional)
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            .set_override_option(
                "generator.default_customer_id",
                env::var("AURA_DEFAULT_CUSTOMER_ID").ok(),
            )
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?
            .set_override_option(
                "generator.batch_start",
                env::var("AURA_BATCH_START")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?
            .set_override_option(
                "logging.enabled",
                env::var("AURA_LOGGING_ENABLED")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok()),
            )
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?
            .set_override_option("logging.level", env::var("AURA_LOG_LEVEL").ok())
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?;

        let config: AuraConfig = settings
            .try_deserialize()
            .map_err(|e| LicenseError::ConfigError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Sanity checks on the loaded values.
    pub fn validate(&self) -> LicenseResult<()> {
        if self.generator.default_customer_id.trim().is_empty() {
            return Err(LicenseError::ConfigError(
                "generator.default_customer_id must not be empty".to_string(),
            ));
        }
        if self.generator.batch_start == 0 {
            return Err(LicenseError::ConfigError(
                "generator.batch_start must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get the global configuration, loading it on first access.
pub fn get_config() -> LicenseResult<&'static AuraConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = AuraConfig::load()?;
    Ok(CONFIG.get_or_init(|| config))
}
