//! Shared utilities and common types for the Tokenkeep server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types
//! - Error codes and response envelopes

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use errors::error_codes;
pub use types::{ApiResponse, HealthResponse, HealthStatus};
