//! MongoDB-backed [`ProductRepository`].

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, to_bson},
    options::FindOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

const COLLECTION: &str = "products";

/// Persists products in a MongoDB collection, serialized through serde.
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    /// Use a non-default collection name, mainly for isolated test databases.
    pub fn with_collection(db: Database, name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(name),
        }
    }

    /// Escape hatch for queries the repository trait does not cover.
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Translates a [`ProductFilter`] into a query document. Field names use
    /// the camelCase wire form that serde writes into the collection.
    fn query_document(filter: &ProductFilter) -> Document {
        let mut query = Document::new();

        if let Some(ref category) = filter.category {
            query.insert("category", category.to_string());
        }
        if let Some(ref status) = filter.status {
            query.insert("status", status.to_string());
        }
        if let Some(ref gender) = filter.gender {
            query.insert("gender", gender.to_string());
        }
        if let Some(featured) = filter.featured {
            query.insert("featured", featured);
        }
        if let Some(best_seller) = filter.best_seller {
            query.insert("bestSeller", best_seller);
        }
        if let Some(ref brand) = filter.brand {
            query.insert("brand", brand);
        }
        if let Some(ref term) = filter.search {
            let pattern = doc! { "$regex": term, "$options": "i" };
            query.insert(
                "$or",
                vec![
                    doc! { "name": pattern.clone() },
                    doc! { "description": pattern },
                ],
            );
        }

        query
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.collection.insert_one(&product).await?;
        tracing::info!(product_id = %product.id, "stored new product");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.collection.find_one(Self::id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(filter.limit)
            .skip(filter.offset)
            .build();

        let cursor = self
            .collection
            .find(Self::query_document(&filter))
            .with_options(options)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Product> {
        let selector = Self::id_filter(id);

        let mut product = self
            .collection
            .find_one(selector.clone())
            .await?
            .ok_or(ProductError::NotFound(id))?;
        product.apply_update(changes);

        // Full replace so the stored document always mirrors the entity
        self.collection.replace_one(selector, &product).await?;
        tracing::info!(product_id = %id, "replaced product document");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let outcome = self.collection.delete_one(Self::id_filter(id)).await?;
        if outcome.deleted_count == 0 {
            return Err(ProductError::NotFound(id));
        }
        tracing::info!(product_id = %id, "removed product document");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        Ok(self
            .collection
            .count_documents(Self::query_document(&filter))
            .await?)
    }
}
