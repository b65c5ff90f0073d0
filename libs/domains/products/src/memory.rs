//! In-memory implementation of ProductRepository
//!
//! Useful for tests and local development without a MongoDB instance.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// In-memory implementation of the ProductRepository
///
/// Mirrors the MongoDB implementation's filtering and ordering semantics.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(product: &Product, filter: &ProductFilter) -> bool {
        if let Some(category) = filter.category {
            if product.category != category {
                return false;
            }
        }
        if let Some(status) = filter.status {
            if product.status != status {
                return false;
            }
        }
        if let Some(gender) = filter.gender {
            if product.gender != Some(gender) {
                return false;
            }
        }
        if let Some(featured) = filter.featured {
            if product.featured != featured {
                return false;
            }
        }
        if let Some(best_seller) = filter.best_seller {
            if product.best_seller != best_seller {
                return false;
            }
        }
        if let Some(ref brand) = filter.brand {
            if product.brand.as_deref() != Some(brand.as_str()) {
                return false;
            }
        }
        if let Some(ref search) = filter.search {
            let needle = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| Self::matches(p, &filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // The MongoDB driver treats a non-positive limit as "no limit"
        let limit = usize::try_from(filter.limit)
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(usize::MAX);
        let offset = usize::try_from(filter.offset).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        match self.products.write().await.remove(&id) {
            Some(_) => Ok(true),
            None => Err(ProductError::NotFound(id)),
        }
    }

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let products = self.products.read().await;
        let count = products.values().filter(|p| Self::matches(p, &filter)).count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn create_input(name: &str, price: f64, category: &str) -> CreateProduct {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "price": price,
            "category": category
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_crud_lifecycle() {
        let repo = InMemoryProductRepository::new();

        let created = repo
            .create(create_input("Round Titanium", 199.0, "Eyeglasses"))
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Round Titanium");

        let update: UpdateProduct =
            serde_json::from_value(serde_json::json!({ "price": 149.0 })).unwrap();
        let updated = repo.update(created.id, update).await.unwrap();
        assert_eq!(updated.price, 149.0);
        assert!(updated.updated_at >= created.updated_at);

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(created.id).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let repo = InMemoryProductRepository::new();
        repo.create(create_input("Wayfarer", 89.0, "Sunglasses"))
            .await
            .unwrap();
        repo.create(create_input("Reader 2x", 25.0, "Reading Glasses"))
            .await
            .unwrap();

        let filter = ProductFilter {
            category: Some(Category::Sunglasses),
            ..Default::default()
        };
        let products = repo.list(filter).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Wayfarer");

        assert_eq!(repo.count(ProductFilter::default()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_default_filter_lists_what_was_created() {
        let repo = InMemoryProductRepository::new();
        repo.create(create_input("Wayfarer", 89.0, "Sunglasses"))
            .await
            .unwrap();

        let products = repo.list(ProductFilter::default()).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Wayfarer");
    }

    #[tokio::test]
    async fn test_zero_limit_means_no_limit() {
        let repo = InMemoryProductRepository::new();
        for name in ["One", "Two", "Three"] {
            repo.create(create_input(name, 10.0, "Eyeglasses"))
                .await
                .unwrap();
        }

        let filter = ProductFilter {
            limit: 0,
            ..Default::default()
        };
        assert_eq!(repo.list(filter).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_limit_and_offset_page_through_results() {
        let repo = InMemoryProductRepository::new();
        for name in ["One", "Two", "Three"] {
            repo.create(create_input(name, 10.0, "Eyeglasses"))
                .await
                .unwrap();
        }

        let first_page = repo
            .list(ProductFilter {
                limit: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(first_page.len(), 2);

        let second_page = repo
            .list(ProductFilter {
                offset: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second_page.len(), 1);

        let past_the_end = repo
            .list(ProductFilter {
                offset: 3,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(past_the_end.is_empty());
    }

    #[tokio::test]
    async fn test_default_limit_caps_large_listings() {
        let repo = InMemoryProductRepository::new();
        for n in 0..60 {
            repo.create(create_input(&format!("Frame {n}"), 10.0, "Sunglasses"))
                .await
                .unwrap();
        }

        let products = repo.list(ProductFilter::default()).await.unwrap();
        assert_eq!(products.len(), 50);
        assert_eq!(repo.count(ProductFilter::default()).await.unwrap(), 60);
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let repo = InMemoryProductRepository::new();
        repo.create(create_input("Aviator Classic", 129.0, "Sunglasses"))
            .await
            .unwrap();

        let filter = ProductFilter {
            search: Some("aviator".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.list(filter).await.unwrap().len(), 1);

        let filter = ProductFilter {
            search: Some("cat eye".to_string()),
            ..Default::default()
        };
        assert!(repo.list(filter).await.unwrap().is_empty());
    }
}
