//! Client session driving the token store through login, refresh and logout

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use crate::domain::entities::session::{SessionEvent, SessionState};
use crate::domain::entities::token::TokenPair;
use crate::errors::DomainError;
use crate::repositories::RevocationRepository;
use crate::services::token::TokenService;

use super::store::TokenStore;

/// Carries a refresh token to whoever can exchange it
#[async_trait]
pub trait RefreshTransport: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError>;
}

#[async_trait]
impl<R: RevocationRepository> RefreshTransport for TokenService<R> {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        TokenService::refresh(self, refresh_token).await
    }
}

#[async_trait]
impl<T: RefreshTransport + ?Sized> RefreshTransport for Arc<T> {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        (**self).refresh(refresh_token).await
    }
}

/// One client's session: a token store plus the session state machine
///
/// The store and the state change together under the state lock. The
/// lock is never held across an await. Refreshes are serialized by a
/// separate async lock, so overlapping callers never present the same
/// refresh token twice.
pub struct ClientSession<S: TokenStore, T: RefreshTransport> {
    store: S,
    transport: T,
    state: Mutex<SessionState>,
    refreshing: AsyncMutex<()>,
}

impl<S: TokenStore, T: RefreshTransport> ClientSession<S, T> {
    /// Creates a session, resuming as authenticated if the store already
    /// holds a pair
    pub fn new(store: S, transport: T) -> Self {
        let state = if store.get().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        Self {
            store,
            transport,
            state: Mutex::new(state),
            refreshing: AsyncMutex::new(()),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.lock_state()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access token to send with the next request
    pub fn access_token(&self) -> Option<String> {
        self.store.get().map(|pair| pair.access_token)
    }

    /// Stores the pair obtained from a successful login
    pub fn login(&self, pair: TokenPair) -> Result<(), DomainError> {
        let mut state = self.lock_state();
        let next = state.apply(SessionEvent::LoggedIn)?;
        self.store.set(pair);
        *state = next;
        Ok(())
    }

    /// Drops the stored pair
    pub fn logout(&self) -> Result<(), DomainError> {
        let mut state = self.lock_state();
        let next = state.apply(SessionEvent::LoggedOut)?;
        self.store.clear();
        *state = next;
        Ok(())
    }

    /// Exchanges the stored refresh token for a new pair
    ///
    /// An `Unauthenticated` answer ends the session: the store is cleared
    /// and the caller has to log in again. Other errors leave the session
    /// untouched.
    pub async fn refresh(&self) -> Result<TokenPair, DomainError> {
        // a caller queued behind another refresh picks up the token it stored
        let _refreshing = self.refreshing.lock().await;

        let refresh_token = match self.current_refresh_token()? {
            Some(token) => token,
            None => {
                self.end_session();
                return Err(DomainError::Unauthenticated);
            }
        };

        match self.transport.refresh(&refresh_token).await {
            Ok(pair) => {
                self.store_refreshed(pair.clone())?;
                debug!("Session refreshed");
                Ok(pair)
            }
            Err(DomainError::Unauthenticated) => {
                warn!("Refresh token rejected, ending session");
                self.end_session();
                Err(DomainError::Unauthenticated)
            }
            Err(other) => Err(other),
        }
    }

    /// Runs `call` with the current access token. If it answers
    /// `Unauthenticated`, refreshes once and runs it again with the new
    /// token.
    pub async fn authorized<F, Fut, O>(&self, call: F) -> Result<O, DomainError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<O, DomainError>>,
    {
        let token = self.access_token().ok_or(DomainError::Unauthenticated)?;
        match call(token).await {
            Err(DomainError::Unauthenticated) => {
                let pair = self.refresh().await?;
                call(pair.access_token).await
            }
            other => other,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn current_refresh_token(&self) -> Result<Option<String>, DomainError> {
        let state = self.lock_state();
        state.apply(SessionEvent::Refreshed)?;
        Ok(self.store.get().map(|pair| pair.refresh_token))
    }

    fn store_refreshed(&self, pair: TokenPair) -> Result<(), DomainError> {
        let mut state = self.lock_state();
        // a logout may have happened while the refresh was in flight
        let next = state.apply(SessionEvent::Refreshed)?;
        self.store.set(pair);
        *state = next;
        Ok(())
    }

    fn end_session(&self) {
        let mut state = self.lock_state();
        if let Ok(next) = state.apply(SessionEvent::RefreshFailed) {
            *state = next;
        }
        self.store.clear();
    }
}
