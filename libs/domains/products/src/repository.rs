use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Storage abstraction the service layer depends on. Swapping the backend
/// (MongoDB, in-memory, a future SQL store) never touches business logic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product built from the create payload.
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Fetch one product, `Ok(None)` when the id is unknown.
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Products matching `filter`, newest first, honoring limit and offset.
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Apply a partial update; `NotFound` when the id is unknown.
    async fn update(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Product>;

    /// Remove a product; `NotFound` when the id is unknown.
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// How many products match `filter`, ignoring limit and offset.
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;
}
