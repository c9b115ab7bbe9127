//! Integration tests for POST /api/v1/auth/refresh

mod common;

use actix_web::{http::header, test};
use chrono::Duration;
use serde_json::{json, Value};
use ts_api::app::create_app;
use ts_shared::ServerConfig;

use common::{bearer, Fixture};

#[actix_web::test]
async fn test_refresh_returns_new_access_token() {
    let fixture = Fixture::new();
    let app = test::init_service(create_app(fixture.state(), &ServerConfig::default())).await;
    let pair = fixture.login("u1");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refreshToken": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["expiresIn"], 900);
    assert_eq!(body["refreshToken"], pair.refresh_token.as_str());

    let access_token = body["accessToken"].as_str().unwrap();
    let claims = fixture.service.verify_access_token(access_token).unwrap();
    assert_eq!(claims.sub, "u1");
    assert_eq!(claims.identity.email.as_deref(), Some("u1@example.com"));
}

#[actix_web::test]
async fn test_refreshed_token_unlocks_protected_route_after_expiry() {
    let fixture = Fixture::new();
    let app = test::init_service(create_app(fixture.state(), &ServerConfig::default())).await;
    let pair = fixture.login("u1");

    fixture.clock.advance(Duration::seconds(901));

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(bearer(&pair.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refreshToken": pair.refresh_token }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let access_token = body["accessToken"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(bearer(access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_expired_refresh_token_is_unauthorized() {
    let fixture = Fixture::new();
    let app = test::init_service(create_app(fixture.state(), &ServerConfig::default())).await;
    let pair = fixture.login("u1");

    fixture.clock.advance(Duration::days(7));

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refreshToken": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[actix_web::test]
async fn test_malformed_and_access_tokens_are_unauthorized() {
    let fixture = Fixture::new();
    let app = test::init_service(create_app(fixture.state(), &ServerConfig::default())).await;
    let pair = fixture.login("u1");

    for token in ["garbage", "a.b.c", pair.access_token.as_str()] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refreshToken": token }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "token {:?} should be rejected", token);
    }
}

#[actix_web::test]
async fn test_missing_refresh_token_is_bad_request() {
    let fixture = Fixture::new();
    let app = test::init_service(create_app(fixture.state(), &ServerConfig::default())).await;

    for payload in [json!({}), json!({ "refreshToken": "" })] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn test_malformed_body_uses_failure_envelope() {
    let fixture = Fixture::new();
    let app = test::init_service(create_app(fixture.state(), &ServerConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_rotation_rejects_replayed_refresh_token() {
    let fixture = Fixture::with_rotation();
    let app = test::init_service(create_app(fixture.state(), &ServerConfig::default())).await;
    let pair = fixture.login("u1");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refreshToken": pair.refresh_token }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_ne!(body["refreshToken"], pair.refresh_token.as_str());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refreshToken": pair.refresh_token }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_auth_responses_are_not_cacheable() {
    let fixture = Fixture::new();
    let app = test::init_service(create_app(fixture.state(), &ServerConfig::default())).await;
    let pair = fixture.login("u1");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refreshToken": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert_eq!(resp.headers().get(header::PRAGMA).unwrap(), "no-cache");
}
