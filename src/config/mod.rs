//! Repository configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `APERTURE` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use aperture_repository::config::StoreConfig;
//!
//! let config = StoreConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root configuration for the persistence layer.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Database configuration (PostgreSQL-backed document store)
    pub database: DatabaseConfig,
}

impl StoreConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `APERTURE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `APERTURE__DATABASE__URL=...` -> `database.url = ...`
    /// - `APERTURE__DATABASE__MAX_CONNECTIONS=10` -> `database.max_connections = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing
    /// or values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("APERTURE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_database() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/aperture".into(),
            min_connections: 1,
            max_connections: 5,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
            run_migrations: false,
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        let config = StoreConfig {
            database: valid_database(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_url_fails_validation() {
        let mut database = valid_database();
        database.url = String::new();
        let config = StoreConfig { database };
        assert!(config.validate().is_err());
    }
}
