//! End-to-end refresh flow: a client session talking to the token service

use std::sync::Arc;

use chrono::Duration;
use ts_core::{
    ClientSession, DomainError, IdentityClaims, InMemoryRevocationRepository, ManualClock,
    MemoryTokenStore, SessionState, TokenService, TokenServiceConfig, TokenStore,
};

type Service = TokenService<InMemoryRevocationRepository>;

fn setup(rotate: bool) -> (Arc<Service>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_now());
    let mut config = TokenServiceConfig::with_secret("refresh-flow-secret");
    config.rotate_refresh_tokens = rotate;

    let service =
        TokenService::with_clock(InMemoryRevocationRepository::new(), config, clock.clone())
            .unwrap();
    (Arc::new(service), clock)
}

/// Stands in for a protected endpoint: answers with the caller's subject
fn protected_call(service: &Service, token: &str) -> Result<String, DomainError> {
    service.verify_access_token(token).map(|claims| claims.sub)
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed_transparently() {
    let (service, clock) = setup(false);
    let session = ClientSession::new(MemoryTokenStore::new(), Arc::clone(&service));
    session
        .login(service.issue_pair("u1", IdentityClaims::default()).unwrap())
        .unwrap();
    let original = session.store().get().unwrap();

    clock.advance(Duration::seconds(901));

    let subject = session
        .authorized(|token| {
            let service = Arc::clone(&service);
            async move { protected_call(&service, &token) }
        })
        .await
        .unwrap();

    assert_eq!(subject, "u1");
    let current = session.store().get().unwrap();
    assert_ne!(current.access_token, original.access_token);
    assert_eq!(current.refresh_token, original.refresh_token);
    assert_eq!(session.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_expired_refresh_token_ends_the_session() {
    let (service, clock) = setup(false);
    let session = ClientSession::new(MemoryTokenStore::new(), Arc::clone(&service));
    session
        .login(service.issue_pair("u1", IdentityClaims::default()).unwrap())
        .unwrap();

    clock.advance(Duration::days(8));

    let result = session
        .authorized(|token| {
            let service = Arc::clone(&service);
            async move { protected_call(&service, &token) }
        })
        .await;

    assert_eq!(result, Err(DomainError::Unauthenticated));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.store().get().is_none());
}

#[tokio::test]
async fn test_rotating_session_keeps_working_across_refreshes() {
    let (service, clock) = setup(true);
    let session = ClientSession::new(MemoryTokenStore::new(), Arc::clone(&service));
    session
        .login(service.issue_pair("u1", IdentityClaims::default()).unwrap())
        .unwrap();

    let mut seen = vec![session.store().get().unwrap().refresh_token];
    for _ in 0..3 {
        clock.advance(Duration::seconds(901));
        session.refresh().await.unwrap();
        let refresh_token = session.store().get().unwrap().refresh_token;
        assert!(!seen.contains(&refresh_token));
        seen.push(refresh_token);
    }

    // the very first refresh token was rotated away
    assert_eq!(service.refresh(&seen[0]).await, Err(DomainError::Unauthenticated));
}
