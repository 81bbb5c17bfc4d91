//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CYBERDRILL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use cyberdrill::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Progress stored in {:?}", config.storage.path);
//! ```

mod error;
mod features;
mod logging;
mod scenario;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::{Environment, LoggingConfig};
pub use scenario::ScenarioConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Progress snapshot storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Scenario generated when no tree file is given
    #[serde(default)]
    pub scenario: ScenarioConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CYBERDRILL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CYBERDRILL__STORAGE__BACKEND=file` -> `storage.backend = file`
    /// - `CYBERDRILL__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CYBERDRILL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.storage.validate()?;
        self.scenario.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.logging.is_production()
    }
}
