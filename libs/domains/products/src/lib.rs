//! Eyewear product catalog domain.
//!
//! The crate is layered the same way as the other domain crates in this
//! workspace: HTTP [`handlers`] call into a [`service::ProductService`] that
//! owns validation and business rules, which in turn talks to any
//! [`repository::ProductRepository`] implementation. Two backends ship here,
//! [`mongodb::MongoProductRepository`] for production and
//! [`memory::InMemoryProductRepository`] for tests and demos.
//!
//! Wiring it up:
//!
//! ```rust,no_run
//! use domain_products::{handlers, mongodb::MongoProductRepository, service::ProductService};
//! use mongodb::Client;
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoProductRepository::new(client.database("storefront"));
//! let router = handlers::router(ProductService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{
    Category, CreateProduct, Discount, Gender, Material, Product, ProductFilter, ProductStatus,
    Shape, UpdateProduct,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
