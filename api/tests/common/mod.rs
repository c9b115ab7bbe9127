//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use ts_api::routes::auth::AppState;
use ts_core::{
    IdentityClaims, InMemoryRevocationRepository, ManualClock, TokenPair, TokenService,
    TokenServiceConfig,
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub type Service = TokenService<InMemoryRevocationRepository>;

pub struct Fixture {
    pub service: Arc<Service>,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(false)
    }

    pub fn with_rotation() -> Self {
        Self::build(true)
    }

    fn build(rotate: bool) -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let mut config = TokenServiceConfig::with_secret(TEST_SECRET);
        config.rotate_refresh_tokens = rotate;

        let service = TokenService::with_clock(
            InMemoryRevocationRepository::new(),
            config,
            clock.clone(),
        )
        .expect("token service");

        Self {
            service: Arc::new(service),
            clock,
        }
    }

    pub fn state(&self) -> web::Data<AppState<InMemoryRevocationRepository>> {
        web::Data::new(AppState::new(Arc::clone(&self.service)))
    }

    pub fn login(&self, subject: &str) -> TokenPair {
        self.service
            .issue_pair(subject, IdentityClaims::default().with_email("u1@example.com"))
            .expect("issue pair")
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
