use async_trait::async_trait;

use super::models::CreateProductCommand;
use super::models::Page;
use super::models::PageRequest;
use super::models::Product;
use super::models::ProductId;
use super::models::UpdateProductCommand;
use crate::domain::product::errors::ProductError;

/// Port for catalog domain service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// List products ordered by name.
    ///
    /// # Arguments
    /// * `page` - Page selection
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_products(&self, page: PageRequest) -> Result<Page<Product>, ProductError>;

    /// Retrieve product by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError>;

    /// Add a new product to the catalog.
    ///
    /// # Returns
    /// Created product with its assigned identifier
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_product(&self, command: CreateProductCommand) -> Result<Product, ProductError>;

    /// Apply a partial update to an existing product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        id: ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Remove a product permanently.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, id: ProductId) -> Result<(), ProductError>;

    /// Search by name or manufacturer fragment, or exact GTIN.
    ///
    /// A blank query behaves like `list_products`.
    ///
    /// # Arguments
    /// * `query` - Raw search text
    /// * `page` - Page selection
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn search_products(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductError>;
}

/// Repository port for product persistence operations.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Persist a new product.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    /// Retrieve product by unique identifier.
    ///
    /// # Returns
    /// Product if found, None otherwise
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError>;

    /// Overwrite all fields of a stored product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// Remove product permanently.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: ProductId) -> Result<(), ProductError>;

    /// One page of all products ordered by name.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_page(&self, page: PageRequest) -> Result<Page<Product>, ProductError>;

    /// One page of products whose name or manufacturer contains `query`
    /// (case-insensitive), or whose GTIN equals it.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn search(&self, query: &str, page: PageRequest)
        -> Result<Page<Product>, ProductError>;
}
