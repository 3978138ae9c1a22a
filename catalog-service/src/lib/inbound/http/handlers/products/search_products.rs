use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Deserialize;

use super::PageData;
use super::PageQuery;
use super::ProductData;
use crate::domain::product::models::PageRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::RequireAuthenticated;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
    page: Option<u32>,
    size: Option<u32>,
}

/// Responds 204 No Content when nothing matches.
pub async fn search_products(
    State(state): State<AppState>,
    _principal: RequireAuthenticated,
    Query(params): Query<SearchQuery>,
) -> Result<Response, ApiError> {
    let page = PageQuery::new(params.page, params.size)
        .into_page_request(PageRequest::DEFAULT_SEARCH_SIZE)?;
    let query = params.query.unwrap_or_default();

    let results = state
        .product_service
        .search_products(&query, page)
        .await
        .map_err(ApiError::from)?;

    if !results.has_content() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let data: PageData<ProductData> = results.into();
    Ok(ApiSuccess::new(StatusCode::OK, data).into_response())
}
