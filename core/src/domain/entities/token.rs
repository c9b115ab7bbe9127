//! Token entities for JWT-based session authentication.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "tokenkeep";

/// Audience carried by access tokens
pub const JWT_ACCESS_AUDIENCE: &str = "tokenkeep-access";

/// Audience carried by refresh tokens
pub const JWT_REFRESH_AUDIENCE: &str = "tokenkeep-refresh";

/// Which kind of token a JWT is. Encoded in the `aud` claim so that one
/// kind can never be verified as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenAudience {
    Access,
    Refresh,
}

impl TokenAudience {
    /// The `aud` claim value for this kind of token
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenAudience::Access => JWT_ACCESS_AUDIENCE,
            TokenAudience::Refresh => JWT_REFRESH_AUDIENCE,
        }
    }

    /// Parse an `aud` claim value
    pub fn from_claim(aud: &str) -> Option<Self> {
        match aud {
            JWT_ACCESS_AUDIENCE => Some(TokenAudience::Access),
            JWT_REFRESH_AUDIENCE => Some(TokenAudience::Refresh),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenAudience::Access => write!(f, "access"),
            TokenAudience::Refresh => write!(f, "refresh"),
        }
    }
}

/// Optional identity attributes carried alongside the subject
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// User email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// User role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl IdentityClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (opaque user identifier)
    pub sub: String,

    /// Optional identity attributes, serialized inline as `email` / `role`
    #[serde(flatten)]
    pub identity: IdentityClaims,

    /// Issued at timestamp (seconds since epoch)
    pub iat: i64,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience, see [`TokenAudience`]
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Checks if the claims have expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// The kind of token these claims were issued for
    pub fn audience(&self) -> Option<TokenAudience> {
        TokenAudience::from_claim(&self.aud)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }
}

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded `header.payload.signature` string
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    /// Seconds between issuance and expiry
    pub fn lifetime_seconds(&self) -> i64 {
        self.claims.exp - self.claims.iat
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(access: IssuedToken, refresh: IssuedToken) -> Self {
        Self {
            expires_in: access.lifetime_seconds(),
            refresh_expires_in: refresh.lifetime_seconds(),
            access_token: access.token,
            refresh_token: refresh.token,
        }
    }
}

/// Verified caller identity, attached to requests that passed the auth guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject: String,
    pub email: Option<String>,
    pub role: Option<String>,
    /// JWT ID of the access token that authenticated the call
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        let expires_at = claims.expires_at();
        Self {
            subject: claims.sub,
            email: claims.identity.email,
            role: claims.identity.role,
            token_id: claims.jti,
            expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims {
            sub: "u1".to_string(),
            identity: IdentityClaims::new().with_email("a@b.com"),
            iat: 1_700_000_000,
            exp: 1_700_000_900,
            iss: JWT_ISSUER.to_string(),
            aud: JWT_ACCESS_AUDIENCE.to_string(),
            jti: "jti-1".to_string(),
        }
    }

    #[test]
    fn test_claims_wire_format() {
        let json = serde_json::to_value(sample_claims()).unwrap();

        assert_eq!(json["sub"], "u1");
        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("role").is_none());
        assert!(json.get("identity").is_none());
        assert_eq!(json["iat"], 1_700_000_000i64);
        assert_eq!(json["exp"], 1_700_000_900i64);
    }

    #[test]
    fn test_claims_expiry_boundary() {
        let claims = sample_claims();
        let before = Utc.timestamp_opt(claims.exp - 1, 0).unwrap();
        let at = Utc.timestamp_opt(claims.exp, 0).unwrap();

        assert!(!claims.is_expired_at(before));
        assert!(claims.is_expired_at(at));
    }

    #[test]
    fn test_audience_round_trip() {
        assert_eq!(sample_claims().audience(), Some(TokenAudience::Access));
        assert_eq!(
            TokenAudience::from_claim(TokenAudience::Refresh.as_str()),
            Some(TokenAudience::Refresh)
        );
        assert_eq!(TokenAudience::from_claim("somebody-else"), None);
    }

    #[test]
    fn test_identity_from_claims() {
        let identity = Identity::from(sample_claims());
        assert_eq!(identity.subject, "u1");
        assert_eq!(identity.email.as_deref(), Some("a@b.com"));
        assert_eq!(identity.role, None);
        assert_eq!(identity.token_id, "jti-1");
        assert_eq!(identity.expires_at.timestamp(), 1_700_000_900);
    }
}
