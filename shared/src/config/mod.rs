//! Configuration module
//!
//! - `auth` - JWT signing, lifetimes and rotation policy
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, DEFAULT_JWT_SECRET};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self::default()
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Base configuration for the given environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => Self {
                environment: Environment::Staging,
                logging: LoggingConfig::for_environment(Environment::Staging),
                ..Self::development()
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT secret must be configured in production".to_string());
        }

        if self.auth.jwt.secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }

        if self.auth.jwt.access_token_expiry <= 0 {
            return Err("Access token expiry must be positive".to_string());
        }

        if self.auth.jwt.refresh_token_expiry <= self.auth.jwt.access_token_expiry {
            return Err("Refresh token expiry must exceed access token expiry".to_string());
        }

        if self.server.port == 0 {
            return Err("Server port must be non-zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig::production();
        assert!(config.validate().is_err());

        let mut config = AppConfig::production();
        config.auth.jwt = JwtConfig::new("a-real-production-secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_refresh_must_outlive_access() {
        let mut config = AppConfig::default();
        config.auth.jwt.refresh_token_expiry = config.auth.jwt.access_token_expiry;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_staging_logging() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.logging.level, "info");
    }
}
