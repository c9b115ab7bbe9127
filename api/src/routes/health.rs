use actix_web::HttpResponse;
use ts_shared::HealthResponse;

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "tokenkeep-api",
        env!("CARGO_PKG_VERSION"),
    ))
}
