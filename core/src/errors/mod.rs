//! Domain-specific error types and error handling.

mod types;

pub use types::{TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors
///
/// Three outcomes reach callers: a bad request, an unauthenticated caller
/// and an internal failure. Session transition errors only arise on the
/// client side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    BadRequest(#[from] ValidationError),

    #[error("Invalid or expired token")]
    Unauthenticated,

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Invalid session transition: cannot apply {event} while {state}")]
    InvalidTransition { state: String, event: String },
}

impl DomainError {
    pub fn required_field(field: impl Into<String>) -> Self {
        DomainError::BadRequest(ValidationError::RequiredField {
            field: field.into(),
        })
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

impl From<TokenError> for DomainError {
    fn from(error: TokenError) -> Self {
        if error.is_verification_failure() {
            DomainError::Unauthenticated
        } else {
            DomainError::Internal {
                message: error.to_string(),
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
