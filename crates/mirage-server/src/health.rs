use axum::response::IntoResponse;
use http::StatusCode;

/// Health check handler
#[allow(clippy::unused_async)]
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
