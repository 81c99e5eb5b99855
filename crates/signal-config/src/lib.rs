//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, LogFormat, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment variable prefix for overrides (`SIGNAL__ANALYSIS__SMA_PERIOD=20`).
pub const ENV_PREFIX: &str = "SIGNAL";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(Some(path), environment())
}

/// Load configuration from the environment alone, on top of the defaults.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    build(None, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build(path: Option<&Path>, env: Environment) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder.add_source(env).build()?;

    config.try_deserialize()
}
