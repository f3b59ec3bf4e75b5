use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DashboardConfig, DataStoreConfig, LoggingConfig, OutputFormat};

/// Prefix of the environment variables that override file settings,
/// e.g. `PATRIMONIO_DATA_STORE__BASE_URL`.
pub const ENV_PREFIX: &str = "PATRIMONIO";

/// Loads the application configuration.
///
/// Reads `config.toml` from the working directory if there is one, then applies
/// `PATRIMONIO_*` environment overrides on top of the built-in defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config.toml").required(false));
    build(builder)
}

/// Loads the application configuration from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder().add_source(config::File::from(path).required(true));
    build(builder)
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = settings.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        base_url = %config.data_store.base_url,
        as_of = ?config.dashboard.as_of,
        "Configuration loaded."
    );
    Ok(config)
}
