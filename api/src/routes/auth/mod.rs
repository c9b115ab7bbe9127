//! Authentication route handlers
//!
//! - Token refresh
//! - Logout
//! - Current session lookup

pub mod logout;
pub mod refresh;
pub mod session;

use std::sync::Arc;

use ts_core::{RevocationRepository, TokenService};

/// Application state shared by the auth handlers
pub struct AppState<R: RevocationRepository> {
    pub token_service: Arc<TokenService<R>>,
}

impl<R: RevocationRepository> AppState<R> {
    pub fn new(token_service: Arc<TokenService<R>>) -> Self {
        Self { token_service }
    }
}

impl<R: RevocationRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            token_service: Arc::clone(&self.token_service),
        }
    }
}
