//! Signed session token encoding and verification

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::error;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, IdentityClaims, IssuedToken, TokenAudience};
use crate::errors::{DomainError, TokenError, ValidationError};

use super::clock::Clock;
use super::config::{is_hmac, TokenServiceConfig};

/// Issues and verifies HMAC-signed JWTs.
///
/// The signing secret is handed over once at construction and never
/// changes afterwards. Expiry is checked against the injected [`Clock`]
/// rather than the wall clock so that it can be simulated.
pub struct TokenCodec {
    algorithm: Algorithm,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a codec for the given secret
    ///
    /// # Errors
    ///
    /// `TokenError::UnsupportedAlgorithm` for anything outside the HMAC family.
    pub fn new(
        secret: impl AsRef<[u8]>,
        algorithm: Algorithm,
        issuer: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenError> {
        if !is_hmac(algorithm) {
            return Err(TokenError::UnsupportedAlgorithm {
                algorithm: format!("{:?}", algorithm),
            });
        }

        let issuer = issuer.into();
        let secret = secret.as_ref();

        Ok(Self {
            algorithm,
            access_validation: validation_for(algorithm, &issuer, TokenAudience::Access),
            refresh_validation: validation_for(algorithm, &issuer, TokenAudience::Refresh),
            issuer,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            clock,
        })
    }

    /// Creates a codec from the token service configuration
    pub fn from_config(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        Self::new(config.jwt_secret.as_bytes(), config.algorithm, config.issuer.clone(), clock)
    }

    /// Current time according to the codec's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issues a signed token expiring `ttl` from now
    ///
    /// # Errors
    ///
    /// * `DomainError::BadRequest` - empty subject or a ttl under one second
    /// * `DomainError::Internal` - signing failed
    pub fn issue(
        &self,
        subject: &str,
        identity: IdentityClaims,
        ttl: Duration,
        audience: TokenAudience,
    ) -> Result<IssuedToken, DomainError> {
        if subject.trim().is_empty() {
            return Err(DomainError::required_field("sub"));
        }
        if ttl.num_seconds() < 1 {
            return Err(ValidationError::OutOfRange {
                field: "ttl".to_string(),
                min: "1s".to_string(),
            }
            .into());
        }

        let iat = self.clock.now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            identity,
            iat,
            exp: iat + ttl.num_seconds(),
            iss: self.issuer.clone(),
            aud: audience.as_str().to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to sign {} token", audience);
            TokenError::GenerationFailed
        })?;

        Ok(IssuedToken { token, claims })
    }

    /// Verifies a token issued for `audience` and returns its claims
    ///
    /// The returned error carries the precise cause. Callers facing the
    /// outside world convert it into `DomainError::Unauthenticated`.
    pub fn verify(&self, token: &str, audience: TokenAudience) -> Result<Claims, TokenError> {
        let validation = match audience {
            TokenAudience::Access => &self.access_validation,
            TokenAudience::Refresh => &self.refresh_validation,
        };

        let claims = decode::<Claims>(token, &self.decoding_key, validation)
            .map_err(|e| map_decode_error(e.kind()))?
            .claims;

        if claims.exp <= claims.iat {
            return Err(TokenError::InvalidClaims);
        }
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

fn validation_for(algorithm: Algorithm, issuer: &str, audience: TokenAudience) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.set_issuer(&[issuer]);
    validation.set_audience(&[audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);
    // expiry is checked against the injected clock
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAudience => TokenError::WrongAudience,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidIssuer | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
        _ => TokenError::Malformed,
    }
}
