use axum::http::StatusCode;

use super::ApiSuccess;

/// Liveness probe.
pub async fn health() -> ApiSuccess<&'static str> {
    ApiSuccess::new(StatusCode::OK, "ok")
}
