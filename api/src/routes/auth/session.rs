use actix_web::HttpResponse;

use crate::dto::auth::SessionResponse;
use crate::middleware::auth::AuthContext;
use ts_shared::ApiResponse;

/// Handler for GET /api/v1/auth/session
///
/// Returns the identity carried by the presented access token.
pub async fn current_session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(SessionResponse::from(
        auth.into_identity(),
    )))
}
