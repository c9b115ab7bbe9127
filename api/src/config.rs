//! Layered configuration loading
//!
//! Sources, later ones winning:
//! 1. Built-in defaults for the detected environment
//! 2. `config/default.toml` (optional)
//! 3. `config/{environment}.toml` (optional)
//! 4. `TS__`-prefixed environment variables, e.g. `TS__AUTH__JWT__SECRET`
//!
//! Dotenv files feed step 4. The environment is picked from the process
//! environment before any dotenv file is read.

use ::config::{Config, ConfigError, Environment as EnvSource, File};
use ts_shared::{AppConfig, Environment};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "TS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Source(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Reads `.env.{environment}` and then `.env` into the process environment
///
/// Variables that are already set are kept, so the process environment
/// beats the environment-specific file, which beats `.env`. Missing files
/// are skipped.
pub fn load_dotenv(environment: Environment) {
    for file in dotenv_files(environment) {
        dotenvy::from_filename(&file).ok();
    }
}

fn dotenv_files(environment: Environment) -> [String; 2] {
    [environment.dotenv_file(), ".env".to_string()]
}

/// Load and validate the configuration for `environment`
pub fn load_for(environment: Environment) -> Result<AppConfig, ConfigLoadError> {
    let defaults = AppConfig::for_environment(environment);

    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    config.environment = environment;
    config.validate().map_err(ConfigLoadError::Invalid)?;

    Ok(config)
}
