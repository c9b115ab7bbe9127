//! # Tokenkeep Core
//!
//! Core logic of the session token service: domain entities, the token
//! codec, the refresh flow, the client-side session store, repository
//! interfaces and the error taxonomy shared by all of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, Identity, IdentityClaims, IssuedToken, SessionEvent, SessionState, TokenAudience,
    TokenPair,
};
pub use errors::{DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{InMemoryRevocationRepository, RevocationRepository};
pub use services::{
    ClientSession, Clock, ManualClock, MemoryTokenStore, RefreshTransport, SystemClock, TokenCodec,
    TokenService, TokenServiceConfig, TokenStore,
};
