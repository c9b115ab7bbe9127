use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, HttpRequest, HttpResponse,
};
use tracing::{debug, error};
use ts_core::DomainError;
use ts_shared::{error_codes, ApiResponse};
use validator::ValidationErrors;

/// Client-facing message for every authentication failure.
/// The precise cause is only ever logged.
pub const UNAUTHENTICATED_MESSAGE: &str = "Invalid or expired token";

/// Maps a domain error onto an HTTP response with the failure envelope
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::BadRequest(cause) => error_response(
            StatusCode::BAD_REQUEST,
            error_codes::BAD_REQUEST,
            cause.to_string(),
        ),
        DomainError::Unauthenticated => error_response(
            StatusCode::UNAUTHORIZED,
            error_codes::UNAUTHORIZED,
            UNAUTHENTICATED_MESSAGE,
        ),
        DomainError::Internal { message } => {
            error!(error = %message, "Internal error while handling request");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            )
        }
        DomainError::InvalidTransition { .. } => {
            error!(error = %error, "Session transition reached the server");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            )
        }
    }
}

/// Maps request validation failures onto a `400`
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let message = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string());

    error_response(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
}

/// JSON extractor configuration answering malformed bodies with the failure envelope
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "Rejected request body");
    let response = error_response(
        StatusCode::BAD_REQUEST,
        error_codes::BAD_REQUEST,
        "Malformed request body",
    );
    InternalError::from_response(err, response).into()
}

/// Default handler for unknown routes
pub async fn not_found() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
}

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::error(code, message))
}
