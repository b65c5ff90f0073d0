//! Products API routes
//!
//! Wires the products domain to HTTP routes backed by MongoDB.

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);

    handlers::router(service)
}
