//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct LendingConfig {
    /// Loan period in whole days; a loan older than this is overdue.
    pub loan_period_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the JSON catalog file.
    pub catalog_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub lending: LendingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix CIRCULATE_)
            .add_source(
                Environment::with_prefix("CIRCULATE")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override catalog path from CATALOG_PATH env var if present
            .set_override_option("storage.catalog_path", env::var("CATALOG_PATH").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            loan_period_days: 14,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            catalog_path: "data/catalog.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
