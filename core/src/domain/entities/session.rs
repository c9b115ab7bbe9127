//! Client session lifecycle.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Whether a client session currently holds a token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

/// Events that move a session between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    Refreshed,
    LoggedOut,
    RefreshFailed,
}

impl SessionState {
    /// Applies an event, returning the next state.
    ///
    /// Only four transitions exist:
    /// `Anonymous --LoggedIn--> Authenticated`,
    /// `Authenticated --Refreshed--> Authenticated`,
    /// `Authenticated --LoggedOut--> Anonymous` and
    /// `Authenticated --RefreshFailed--> Anonymous`.
    pub fn apply(self, event: SessionEvent) -> Result<SessionState, DomainError> {
        match (self, event) {
            (SessionState::Anonymous, SessionEvent::LoggedIn) => Ok(SessionState::Authenticated),
            (SessionState::Authenticated, SessionEvent::Refreshed) => Ok(SessionState::Authenticated),
            (SessionState::Authenticated, SessionEvent::LoggedOut)
            | (SessionState::Authenticated, SessionEvent::RefreshFailed) => Ok(SessionState::Anonymous),
            (state, event) => Err(DomainError::InvalidTransition {
                state: format!("{:?}", state),
                event: format!("{:?}", event),
            }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}
