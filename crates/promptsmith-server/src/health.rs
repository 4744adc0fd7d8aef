use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe; the dispatcher has no dependencies worth checking
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
