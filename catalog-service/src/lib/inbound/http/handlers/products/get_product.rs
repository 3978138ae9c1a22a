use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_product_id;
use super::ProductData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::RequireAuthenticated;
use crate::inbound::http::router::AppState;

pub async fn get_product(
    State(state): State<AppState>,
    _principal: RequireAuthenticated,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .get_product(product_id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
