//! Main token service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, IdentityClaims, TokenAudience, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationRepository;

use super::clock::{Clock, SystemClock};
use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Service for issuing, verifying and refreshing session tokens
pub struct TokenService<R: RevocationRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    codec: TokenCodec,
}

impl<R: RevocationRepository> TokenService<R> {
    /// Creates a new token service using the system clock
    ///
    /// # Arguments
    ///
    /// * `repository` - Revocation list, consulted only when rotation is enabled
    /// * `config` - Token service configuration, including the signing secret
    pub fn new(repository: R, config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }

    /// Creates a new token service with an explicit clock
    pub fn with_clock(
        repository: R,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let codec = TokenCodec::from_config(&config, clock)?;
        Ok(Self {
            repository,
            config,
            codec,
        })
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a fresh access/refresh pair, e.g. after a successful login
    /// against the identity backend
    pub fn issue_pair(&self, subject: &str, identity: IdentityClaims) -> Result<TokenPair, DomainError> {
        let access = self.codec.issue(
            subject,
            identity.clone(),
            self.config.access_token_ttl,
            TokenAudience::Access,
        )?;
        let refresh = self.codec.issue(
            subject,
            identity,
            self.config.refresh_token_ttl,
            TokenAudience::Refresh,
        )?;

        info!(subject = %subject, "Issued token pair");
        Ok(TokenPair::new(access, refresh))
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError::Unauthenticated)` - Invalid, expired or not an access token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.codec.verify(token, TokenAudience::Access).map_err(|cause| {
            debug!(cause = %cause, "Access token rejected");
            DomainError::from(cause)
        })
    }

    /// Exchanges a refresh token for a new access token
    ///
    /// The refresh token is returned unchanged unless rotation is enabled,
    /// in which case the presented token is revoked and a new one issued.
    /// A rejected refresh token is final for the session: the caller has
    /// to log in again.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New access token plus the refresh token to keep
    /// * `Err(DomainError::BadRequest)` - No refresh token supplied
    /// * `Err(DomainError::Unauthenticated)` - Invalid, expired, revoked or not a refresh token
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        if refresh_token.trim().is_empty() {
            return Err(DomainError::required_field("refreshToken"));
        }

        let claims = self
            .codec
            .verify(refresh_token, TokenAudience::Refresh)
            .map_err(|cause| {
                debug!(cause = %cause, "Refresh token rejected");
                DomainError::from(cause)
            })?;

        let access = self.codec.issue(
            &claims.sub,
            claims.identity.clone(),
            self.config.access_token_ttl,
            TokenAudience::Access,
        )?;

        if !self.config.rotate_refresh_tokens {
            let pair = TokenPair {
                expires_in: access.lifetime_seconds(),
                access_token: access.token,
                refresh_token: refresh_token.to_string(),
                refresh_expires_in: (claims.expires_at() - self.codec.now()).num_seconds().max(0),
            };
            info!(subject = %claims.sub, rotated = false, "Access token refreshed");
            return Ok(pair);
        }

        let refresh = self.codec.issue(
            &claims.sub,
            claims.identity.clone(),
            self.config.refresh_token_ttl,
            TokenAudience::Refresh,
        )?;

        // revoked only once the replacement exists; revoke() reports whether
        // this call did the revoking, so a replay cannot also succeed
        let first_use = self.repository.revoke(&claims.jti, claims.expires_at()).await?;
        if !first_use {
            let cause = TokenError::Revoked;
            warn!(subject = %claims.sub, jti = %claims.jti, cause = %cause, "Refresh token rejected");
            return Err(DomainError::from(cause));
        }

        info!(subject = %claims.sub, rotated = true, "Access token refreshed");
        Ok(TokenPair::new(access, refresh))
    }

    /// Revokes a refresh token, e.g. on logout
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Token was revoked by this call
    /// * `Ok(false)` - Rotation is disabled or the token was already revoked
    /// * `Err(DomainError::Unauthenticated)` - Token is not a valid refresh token
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<bool, DomainError> {
        let claims = self
            .codec
            .verify(refresh_token, TokenAudience::Refresh)
            .map_err(DomainError::from)?;

        if !self.config.rotate_refresh_tokens {
            return Ok(false);
        }

        let revoked = self.repository.revoke(&claims.jti, claims.expires_at()).await?;
        if revoked {
            info!(subject = %claims.sub, "Refresh token revoked");
        }
        Ok(revoked)
    }

    /// Drops revocation entries for tokens that have expired anyway
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of entries removed
    pub async fn purge_revocations(&self) -> Result<usize, DomainError> {
        let purged = self.repository.purge_expired(self.codec.now()).await?;
        if purged > 0 {
            debug!(purged, "Purged expired revocation entries");
        }
        Ok(purged)
    }
}
