use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_product_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::RequireAdmin;
use crate::inbound::http::router::AppState;

pub async fn delete_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .delete_product(product_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
