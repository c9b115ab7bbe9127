//! Application factory
//!
//! Wires the shared state, middleware and routes into an Actix-web `App`.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;
use ts_core::RevocationRepository;
use ts_shared::ServerConfig;

use crate::handlers::error::{json_config, not_found};
use crate::middleware::{auth::JwtAuth, cache::NoStore};
use crate::routes::auth::{
    logout::logout, refresh::refresh_token, session::current_session, AppState,
};
use crate::routes::health::health_check;

/// Create and configure the application with all dependencies
pub fn create_app<R>(
    app_state: web::Data<AppState<R>>,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    R: RevocationRepository + 'static,
{
    let auth = JwtAuth::new(Arc::clone(&app_state.token_service));

    App::new()
        .app_data(app_state)
        .app_data(json_config(server.max_payload_size))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .wrap(NoStore)
                    .route("/refresh", web::post().to(refresh_token::<R>))
                    .route(
                        "/logout",
                        web::post().to(logout::<R>).wrap(auth.clone()),
                    )
                    .route(
                        "/session",
                        web::get().to(current_session).wrap(auth),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}
