//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use ts_shared::config::JwtConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};
use crate::errors::TokenError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Value of the `iss` claim
    pub issuer: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// Rotate refresh tokens on every refresh
    pub rotate_refresh_tokens: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: ts_shared::config::DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            access_token_ttl: Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            refresh_token_ttl: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            rotate_refresh_tokens: false,
        }
    }
}

impl TokenServiceConfig {
    /// Config with an explicit secret and default lifetimes
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Build from the shared application configuration
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, TokenError> {
        Ok(Self {
            jwt_secret: jwt.secret.clone(),
            algorithm: parse_algorithm(&jwt.algorithm)?,
            issuer: jwt.issuer.clone(),
            access_token_ttl: Duration::seconds(jwt.access_token_expiry),
            refresh_token_ttl: Duration::seconds(jwt.refresh_token_expiry),
            rotate_refresh_tokens: jwt.rotate_refresh_tokens,
        })
    }
}

/// Parse an algorithm name, accepting only the symmetric HMAC variants
pub(crate) fn parse_algorithm(name: &str) -> Result<Algorithm, TokenError> {
    match name.to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(TokenError::UnsupportedAlgorithm {
            algorithm: name.to_string(),
        }),
    }
}

pub(crate) fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}
