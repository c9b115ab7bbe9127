use actix_web::{web, HttpResponse};
use tracing::{debug, info};

use crate::dto::auth::LogoutRequest;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use ts_core::{DomainError, RevocationRepository};
use ts_shared::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Requires a Bearer access token. When a refresh token is supplied and
/// rotation is enabled, it is revoked so it cannot be exchanged again.
/// Without rotation tokens simply run out; the client drops its copy.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
pub async fn logout<R>(
    state: web::Data<AppState<R>>,
    auth: AuthContext,
    body: Option<web::Json<LogoutRequest>>,
) -> HttpResponse
where
    R: RevocationRepository + 'static,
{
    let refresh_token = body
        .and_then(|body| body.into_inner().refresh_token)
        .filter(|token| !token.trim().is_empty());

    if let Some(token) = refresh_token {
        match state.token_service.revoke_refresh_token(&token).await {
            Ok(revoked) => debug!(subject = %auth.subject, revoked, "Processed logout revocation"),
            // a dead refresh token does not stop the caller from logging out
            Err(DomainError::Unauthenticated) => {
                debug!(subject = %auth.subject, "Ignoring invalid refresh token on logout")
            }
            Err(error) => return handle_domain_error(&error),
        }
    }

    info!(subject = %auth.subject, "User logged out");
    HttpResponse::Ok().json(ApiResponse::ok())
}
