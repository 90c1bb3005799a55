use crate::climate::config::QueryConfig;
use crate::database::config::DatabaseConfig;
use crate::server::config::{LoggingConfig, MetricsConfig, ServerConfig, ShutdownConfig};
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

impl Config {
    /// Load defaults, then `config.yaml` from the working directory if present,
    /// then `CLIMATE_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(config::Config::try_from(&Config::default())?);

        if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(environment());

        builder.build()?.try_deserialize()
    }

    /// Same layering as [`Config::load`] with an explicit file path; a missing
    /// file falls back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(config::Config::try_from(&Config::default())?);

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(environment());

        builder.build()?.try_deserialize()
    }
}

/// `CLIMATE_DATABASE__URL` overrides `database.url`
fn environment() -> Environment {
    Environment::with_prefix("CLIMATE")
        .prefix_separator("_")
        .separator("__")
}
