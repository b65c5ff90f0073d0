//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer handles validation, business rules, and orchestrates
/// repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products with optional filters
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete(id).await?;
        Ok(())
    }

    /// Count products matching a filter
    #[instrument(skip(self))]
    pub async fn count_products(&self, filter: ProductFilter) -> ProductResult<u64> {
        self.repository.count(filter).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn sample_create() -> CreateProduct {
        serde_json::from_value(serde_json::json!({
            "name": "Aviator Classic",
            "price": 129.0,
            "category": "Sunglasses"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_product_persists_valid_input() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(repo);
        let product = service.create_product(sample_create()).await.unwrap();

        assert_eq!(product.name, "Aviator Classic");
        assert_eq!(product.price, 129.0);
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price() {
        let mut repo = MockProductRepository::new();
        // The repository must never be touched for invalid input
        repo.expect_create().times(0);

        let service = ProductService::new(repo);
        let mut input = sample_create();
        input.price = -10.0;

        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let err = service.get_product(id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(found) if found == id));
    }

    #[tokio::test]
    async fn test_update_product_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_update()
            .times(1)
            .returning(move |id, _| Err(ProductError::NotFound(id)));

        let service = ProductService::new(repo);
        let err = service
            .update_product(id, UpdateProduct::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_product_rejects_invalid_discount() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().times(0);

        let service = ProductService::new(repo);
        let input: UpdateProduct = serde_json::from_value(serde_json::json!({
            "discount": { "isDiscounted": true, "percentage": 150.0 }
        }))
        .unwrap();

        let err = service.update_product(Uuid::now_v7(), input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_product_propagates_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|id| Err(ProductError::NotFound(id)));

        let service = ProductService::new(repo);
        let err = service.delete_product(id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_products_passes_filter_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_list().times(1).returning(|_| Ok(vec![]));

        let service = ProductService::new(repo);
        let products = service
            .list_products(ProductFilter::default())
            .await
            .unwrap();
        assert!(products.is_empty());
    }
}
