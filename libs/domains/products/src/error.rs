use axum::response::{IntoResponse, Response};
use axum_helpers::errors::AppError;
use thiserror::Error;
use uuid::Uuid;

pub type ProductResult<T> = Result<T, ProductError>;

/// Domain error taxonomy. Everything the catalog can fail with collapses
/// into one of these, which then map onto the shared HTTP error shape.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("no product with id {0}")]
    NotFound(Uuid),

    #[error("invalid product data: {0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Database(String),

    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("no product with id {id}")),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) | ProductError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
