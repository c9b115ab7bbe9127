//! In-process implementation of RevocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::RevocationRepository;

/// Revocation list held in memory, shared between clones
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationRepository {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryRevocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids currently tracked
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(token_id) {
            return Ok(false);
        }
        entries.insert(token_id.to_string(), expires_at);
        Ok(true)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        Ok(before - entries.len())
    }
}
