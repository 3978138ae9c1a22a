use std::sync::Arc;

use async_trait::async_trait;

use super::errors::ProductError;
use super::models::CreateProductCommand;
use super::models::Page;
use super::models::PageRequest;
use super::models::Product;
use super::models::ProductId;
use super::models::UpdateProductCommand;
use super::ports::ProductRepository;
use super::ports::ProductServicePort;

/// Concrete implementation of ProductServicePort.
///
/// Generic over repository for testability.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    product_repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(product_repository: Arc<PR>) -> Self {
        Self { product_repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository + 'static,
{
    async fn list_products(&self, page: PageRequest) -> Result<Page<Product>, ProductError> {
        self.product_repository.find_page(page).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.product_repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn create_product(&self, command: CreateProductCommand) -> Result<Product, ProductError> {
        let product = command.into_product(ProductId::new());
        let created = self.product_repository.create(product).await?;

        tracing::info!(product_id = %created.id, name = %created.name, "Product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(id).await?;
        command.apply_to(&mut product);

        let updated = self.product_repository.update(product).await?;

        tracing::info!(product_id = %updated.id, "Product updated");

        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.product_repository.delete(id).await?;

        tracing::info!(product_id = %id, "Product deleted");

        Ok(())
    }

    async fn search_products(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let query = query.trim();
        if query.is_empty() {
            return self.product_repository.find_page(page).await;
        }

        self.product_repository.search(query, page).await
    }
}
