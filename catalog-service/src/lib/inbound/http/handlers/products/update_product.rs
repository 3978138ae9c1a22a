use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::create_product::ParseProductRequestError;
use super::parse_product_id;
use super::NutritionalFactData;
use super::ProductData;
use crate::domain::product::models::Gtin;
use crate::domain::product::models::ProductText;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::RequireAdmin;
use crate::inbound::http::router::AppState;

/// Partial update: absent or null fields keep their stored value.
pub async fn update_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .update_product(product_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

/// HTTP request body for updating a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UpdateProductRequest {
    manufacturer: Option<String>,
    name: Option<String>,
    weight: Option<Decimal>,
    nutritional_fact: Option<NutritionalFactData>,
    photo_url: Option<String>,
    gtin: Option<String>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ParseProductRequestError> {
        let manufacturer = self
            .manufacturer
            .map(ProductText::new)
            .transpose()
            .map_err(ParseProductRequestError::Manufacturer)?;
        let name = self
            .name
            .map(ProductText::new)
            .transpose()
            .map_err(ParseProductRequestError::Name)?;
        let gtin = self.gtin.map(Gtin::new).transpose()?;

        Ok(UpdateProductCommand {
            manufacturer,
            name,
            weight: self.weight,
            nutritional_fact: self.nutritional_fact.map(Into::into),
            photo_url: self.photo_url,
            gtin,
        })
    }
}
