//! Error types for token verification and input validation
//!
//! `TokenError` keeps the precise reason a token was rejected. It never
//! reaches HTTP callers: converting it into a `DomainError` collapses every
//! verification failure into `Unauthenticated`.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token presented to the wrong audience")]
    WrongAudience,

    #[error("Token revoked")]
    Revoked,

    #[error("Token generation failed")]
    GenerationFailed,

    #[error("Unsupported signing algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },
}

impl TokenError {
    /// Whether this error means "the presented token is not acceptable"
    /// as opposed to a failure on our side
    pub fn is_verification_failure(&self) -> bool {
        !matches!(
            self,
            TokenError::GenerationFailed | TokenError::UnsupportedAlgorithm { .. }
        )
    }
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Out of range: {field} (min: {min})")]
    OutOfRange { field: String, min: String },
}
