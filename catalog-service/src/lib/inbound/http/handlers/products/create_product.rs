use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use super::product_location;
use super::NutritionalFactData;
use super::ProductData;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Gtin;
use crate::domain::product::models::ProductText;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::RequireAdmin;
use crate::inbound::http::router::AppState;
use crate::product::errors::GtinError;
use crate::product::errors::ProductTextError;

/// Responds 201 Created with a `Location` header pointing at the new product.
pub async fn create_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .product_service
        .create_product(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok((
        [(header::LOCATION, product_location(product.id))],
        ApiSuccess::new(StatusCode::CREATED, ProductData::from(&product)),
    ))
}

/// HTTP request body for creating a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    manufacturer: String,
    name: String,
    weight: Option<Decimal>,
    nutritional_fact: Option<NutritionalFactData>,
    photo_url: Option<String>,
    gtin: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub(super) enum ParseProductRequestError {
    #[error("Invalid manufacturer: {0}")]
    Manufacturer(ProductTextError),

    #[error("Invalid name: {0}")]
    Name(ProductTextError),

    #[error("Invalid GTIN: {0}")]
    Gtin(#[from] GtinError),
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ParseProductRequestError> {
        let manufacturer =
            ProductText::new(self.manufacturer).map_err(ParseProductRequestError::Manufacturer)?;
        let name = ProductText::new(self.name).map_err(ParseProductRequestError::Name)?;
        let gtin = self.gtin.map(Gtin::new).transpose()?;

        Ok(CreateProductCommand {
            manufacturer,
            name,
            weight: self.weight,
            nutritional_fact: self.nutritional_fact.map(Into::into),
            photo_url: self.photo_url,
            gtin,
        })
    }
}

impl From<ParseProductRequestError> for ApiError {
    fn from(err: ParseProductRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
