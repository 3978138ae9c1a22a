use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use super::PageData;
use super::PageQuery;
use super::ProductData;
use crate::domain::product::models::PageRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::RequireAuthenticated;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    _principal: RequireAuthenticated,
    Query(params): Query<PageQuery>,
) -> Result<ApiSuccess<PageData<ProductData>>, ApiError> {
    let page = params.into_page_request(PageRequest::DEFAULT_LIST_SIZE)?;

    state
        .product_service
        .list_products(page)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}
