//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Signing and verifying access and refresh tokens
//! - Exchanging refresh tokens for new access tokens
//! - Optional refresh token rotation backed by a revocation list

mod clock;
mod codec;
mod config;
mod service;


pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
