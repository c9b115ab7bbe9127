//! Domain entities representing core business objects.

pub mod session;
pub mod token;

// Re-export commonly used types
pub use session::{SessionEvent, SessionState};
pub use token::{
    Claims, Identity, IdentityClaims, IssuedToken, TokenAudience, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_ACCESS_AUDIENCE, JWT_ISSUER, JWT_REFRESH_AUDIENCE,
    REFRESH_TOKEN_EXPIRY_DAYS,
};
