use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{RefreshResponse, RefreshTokenRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use ts_core::RevocationRepository;
use ts_shared::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new access token.
///
/// # Request Body
///
/// ```json
/// {
///     "refreshToken": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ...",
///     "expiresIn": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `refreshToken` missing or empty
/// - 401 Unauthorized: Invalid, expired or revoked refresh token
pub async fn refresh_token<R>(
    state: web::Data<AppState<R>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    R: RevocationRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.token_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(ApiResponse::success(RefreshResponse::from(pair))),
        Err(error) => handle_domain_error(&error),
    }
}
