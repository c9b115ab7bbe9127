//! Revocation repository trait for refresh token rotation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Repository of revoked token ids (`jti` claims)
///
/// Entries only need to live until the revoked token would have expired
/// anyway; after that the codec rejects the token on its own.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Mark a token id as revoked
    ///
    /// # Returns
    /// * `Ok(true)` - The id was not revoked before this call
    /// * `Ok(false)` - The id was already revoked
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Drop entries whose token expired at or before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
