//! Client-side token storage

use std::sync::RwLock;

use crate::domain::entities::token::TokenPair;

/// Holds the token pair of one client session
///
/// `set` and `clear` replace the whole pair at once; a reader never sees
/// an access token from one pair next to the refresh token of another.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<TokenPair>;
    fn set(&self, pair: TokenPair);
    fn clear(&self);
}

/// Token store kept in process memory, scoped to one client instance
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    pair: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<TokenPair> {
        self.pair.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, pair: TokenPair) {
        *self.pair.write().unwrap_or_else(|e| e.into_inner()) = Some(pair);
    }

    fn clear(&self) {
        *self.pair.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
