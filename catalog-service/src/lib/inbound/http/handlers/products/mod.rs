pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_products;
pub mod search_products;
pub mod update_product;

pub use create_product::create_product;
pub use delete_product::delete_product;
pub use get_product::get_product;
pub use list_products::list_products;
use rust_decimal::Decimal;
pub use search_products::search_products;
use serde::Deserialize;
use serde::Serialize;
pub use update_product::update_product;

use crate::domain::product::models::NutritionalFact;
use crate::domain::product::models::Page;
use crate::domain::product::models::PageRequest;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::inbound::http::handlers::ApiError;
use crate::product::errors::ProductError;

/// Product as returned by every catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub id: String,
    pub manufacturer: String,
    pub name: String,
    pub weight: Option<Decimal>,
    pub nutritional_fact: Option<NutritionalFactData>,
    pub photo_url: Option<String>,
    pub gtin: Option<String>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            manufacturer: product.manufacturer.as_str().to_string(),
            name: product.name.as_str().to_string(),
            weight: product.weight,
            nutritional_fact: product.nutritional_fact.as_ref().map(Into::into),
            photo_url: product.photo_url.clone(),
            gtin: product.gtin.as_ref().map(|gtin| gtin.as_str().to_string()),
        }
    }
}

/// Nutrition label in both directions of the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionalFactData {
    pub calories: i32,
    pub kilojoules: i32,
    pub fat: Option<Decimal>,
    pub carbohydrates: Option<Decimal>,
    pub sugars: Option<Decimal>,
    pub polyols: Option<Decimal>,
    pub fibers: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub sodium: Option<Decimal>,
    pub vitamin_c: Option<Decimal>,
    pub calcium: Option<Decimal>,
}

impl From<&NutritionalFact> for NutritionalFactData {
    fn from(fact: &NutritionalFact) -> Self {
        Self {
            calories: fact.calories,
            kilojoules: fact.kilojoules,
            fat: fact.fat,
            carbohydrates: fact.carbohydrates,
            sugars: fact.sugars,
            polyols: fact.polyols,
            fibers: fact.fibers,
            protein: fact.protein,
            sodium: fact.sodium,
            vitamin_c: fact.vitamin_c,
            calcium: fact.calcium,
        }
    }
}

impl From<NutritionalFactData> for NutritionalFact {
    fn from(data: NutritionalFactData) -> Self {
        Self {
            calories: data.calories,
            kilojoules: data.kilojoules,
            fat: data.fat,
            carbohydrates: data.carbohydrates,
            sugars: data.sugars,
            polyols: data.polyols,
            fibers: data.fibers,
            protein: data.protein,
            sodium: data.sodium,
            vitamin_c: data.vitamin_c,
            calcium: data.calcium,
        }
    }
}

/// Page envelope for list and search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageData<T: Serialize + PartialEq> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<Product>> for PageData<ProductData> {
    fn from(page: Page<Product>) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(|ref product| ProductData::from(product));
        Self {
            content: page.content,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
        }
    }
}

/// `?page=&size=` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
    size: Option<u32>,
}

impl PageQuery {
    fn new(page: Option<u32>, size: Option<u32>) -> Self {
        Self { page, size }
    }

    fn into_page_request(self, default_size: u32) -> Result<PageRequest, ApiError> {
        PageRequest::new(self.page.unwrap_or(0), self.size.unwrap_or(default_size))
            .map_err(|e| ApiError::from(ProductError::from(e)))
    }
}

fn parse_product_id(product_id: &str) -> Result<ProductId, ApiError> {
    ProductId::from_string(product_id).map_err(|e| ApiError::from(ProductError::from(e)))
}

fn product_location(id: ProductId) -> String {
    format!("/api/v1/products/{}", id)
}
