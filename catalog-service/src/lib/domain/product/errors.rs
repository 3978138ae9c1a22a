use thiserror::Error;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for name/manufacturer validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductTextError {
    #[error("Field can't be empty")]
    Blank,

    #[error("Text too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for GTIN validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GtinError {
    #[error("Invalid GTIN (expected 8, 12, 13 or 14 digits): {0}")]
    InvalidFormat(String),
}

/// Error for paging parameters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("Page size must be between 1 and {max}, got {actual}")]
    InvalidSize { max: u32, actual: u32 },
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("Invalid product field: {0}")]
    InvalidText(#[from] ProductTextError),

    #[error("Invalid GTIN: {0}")]
    InvalidGtin(#[from] GtinError),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(#[from] PageRequestError),

    #[error("Product with id: {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
