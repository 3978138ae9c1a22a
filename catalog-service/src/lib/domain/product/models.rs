use std::fmt;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::product::errors::GtinError;
use crate::domain::product::errors::PageRequestError;
use crate::domain::product::errors::ProductIdError;
use crate::domain::product::errors::ProductTextError;

/// Catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub manufacturer: ProductText,
    pub name: ProductText,
    pub weight: Option<Decimal>,
    pub nutritional_fact: Option<NutritionalFact>,
    pub photo_url: Option<String>,
    pub gtin: Option<Gtin>,
}

/// Product unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-blank, trimmed text of at most 255 characters (names, manufacturers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductText(String);

impl ProductText {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `TooLong` - Longer than 255 characters
    pub fn new(text: String) -> Result<Self, ProductTextError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ProductTextError::Blank);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ProductTextError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Global Trade Item Number: 8, 12, 13 or 14 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gtin(String);

impl Gtin {
    const VALID_LENGTHS: [usize; 4] = [8, 12, 13, 14];

    /// # Errors
    /// * `InvalidFormat` - Not a digit string of a GTIN length
    pub fn new(gtin: String) -> Result<Self, GtinError> {
        let gtin = gtin.trim().to_string();
        let all_digits = !gtin.is_empty() && gtin.chars().all(|c| c.is_ascii_digit());

        if !all_digits || !Self::VALID_LENGTHS.contains(&gtin.len()) {
            return Err(GtinError::InvalidFormat(gtin));
        }

        Ok(Self(gtin))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Nutrition label per 100 g.
///
/// Energy values are mandatory, everything else may be missing from the label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NutritionalFact {
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

/// Command to create a product with validated fields.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub manufacturer: ProductText,
    pub name: ProductText,
    pub weight: Option<Decimal>,
    pub nutritional_fact: Option<NutritionalFact>,
    pub photo_url: Option<String>,
    pub gtin: Option<Gtin>,
}

impl CreateProductCommand {
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            manufacturer: self.manufacturer,
            name: self.name,
            weight: self.weight,
            nutritional_fact: self.nutritional_fact,
            photo_url: self.photo_url,
            gtin: self.gtin,
        }
    }
}

/// Command to update an existing product with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated; a provided nutritional fact replaces
/// the stored one as a whole.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductCommand {
    pub manufacturer: Option<ProductText>,
    pub name: Option<ProductText>,
    pub weight: Option<Decimal>,
    pub nutritional_fact: Option<NutritionalFact>,
    pub photo_url: Option<String>,
    pub gtin: Option<Gtin>,
}

impl UpdateProductCommand {
    pub fn apply_to(self, product: &mut Product) {
        if let Some(manufacturer) = self.manufacturer {
            product.manufacturer = manufacturer;
        }
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(weight) = self.weight {
            product.weight = Some(weight);
        }
        if let Some(nutritional_fact) = self.nutritional_fact {
            product.nutritional_fact = Some(nutritional_fact);
        }
        if let Some(photo_url) = self.photo_url {
            product.photo_url = Some(photo_url);
        }
        if let Some(gtin) = self.gtin {
            product.gtin = Some(gtin);
        }
    }
}

/// Zero-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub const MAX_SIZE: u32 = 100;
    pub const DEFAULT_LIST_SIZE: u32 = 5;
    pub const DEFAULT_SEARCH_SIZE: u32 = 10;

    /// # Errors
    /// * `InvalidSize` - Size is zero or above 100
    pub fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 || size > Self::MAX_SIZE {
            return Err(PageRequestError::InvalidSize {
                max: Self::MAX_SIZE,
                actual: size,
            });
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of items before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
