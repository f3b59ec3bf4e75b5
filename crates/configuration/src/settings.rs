use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an absent `config.toml` still
/// yields a usable configuration pointing at a local data store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_store: DataStoreConfig,
    pub logging: LoggingConfig,
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Checks the values deserialisation alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.data_store.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "data_store.base_url must not be empty".to_string(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "data_store.base_url must start with http:// or https://, got '{base_url}'"
            )));
        }
        if self.data_store.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "data_store.timeout_secs must be greater than 0".to_string(),
            ));
        }
        let currency = &self.dashboard.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::ValidationError(format!(
                "dashboard.currency must be a three-letter ISO code, got '{currency}'"
            )));
        }
        Ok(())
    }
}

/// Where the REST data store lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataStoreConfig {
    /// Base URL of the store, without a trailing slash (e.g., "http://localhost:3001").
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for DataStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Log verbosity and an optional directory for rolling log files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as "info" or "analytics=debug". `RUST_LOG` wins over it.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Pins the evaluation date. Defaults to today when absent.
    pub as_of: Option<NaiveDate>,
    /// ISO code printed next to amounts.
    pub currency: String,
    pub output: OutputFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            as_of: None,
            currency: "EUR".to_string(),
            output: OutputFormat::Table,
        }
    }
}

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
