pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// The one error body every endpoint in the workspace answers with.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "no product with id 0198c0de-...",
///   "details": null
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable integer code from the [`ErrorCode`] registry
    pub code: i32,
    /// SCREAMING_SNAKE identifier clients can branch on
    pub error: String,
    /// Text meant for humans, safe to show in a UI
    pub message: String,
    /// Structured extras such as per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Body carrying an error code's default message.
    fn from_code(code: ErrorCode) -> Self {
        Self::with_message(code, code.default_message().to_string())
    }

    fn with_message(code: ErrorCode, message: String) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details: None,
        }
    }
}

/// Application-level error convertible into an HTTP response.
///
/// Client errors (4xx) echo their message to the caller. Server errors
/// (5xx) log the detail and answer with the code's generic message only,
/// so internals never leak through the API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("json serialization failed: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("body rejected: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("validation failed: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("bad uuid: {0}")]
    UuidError(#[from] UuidError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    InternalServerError(String),

    #[error("unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::SerdeJson(e) => {
                tracing::error!(error_code = ErrorCode::SerdeJsonError.code(), error = ?e, "response serialization failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::from_code(ErrorCode::SerdeJsonError),
                )
            }
            AppError::Io(e) => {
                tracing::error!(error_code = ErrorCode::IoError.code(), error = ?e, "i/o failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::from_code(ErrorCode::IoError),
                )
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = ErrorCode::InvalidJson.code(), error = ?e, "request body rejected");
                (
                    e.status(),
                    ErrorResponse::with_message(ErrorCode::InvalidJson, e.body_text()),
                )
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), error = ?e, "payload failed validation");
                let mut body = ErrorResponse::from_code(ErrorCode::ValidationError);
                body.details = Some(serde_json::to_value(&e).unwrap_or(serde_json::Value::Null));
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::UuidError(e) => {
                tracing::warn!(error_code = ErrorCode::InvalidUuid.code(), error = ?e, "uuid parse failed");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::from_code(ErrorCode::InvalidUuid),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "rejected request: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_message(ErrorCode::ValidationError, msg),
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "missing resource: {msg}");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_message(ErrorCode::NotFound, msg),
                )
            }
            AppError::InternalServerError(msg) => {
                // Detail stays in the logs only
                tracing::error!(error_code = ErrorCode::InternalError.code(), "internal failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::from_code(ErrorCode::InternalError),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = ErrorCode::ServiceUnavailable.code(), "unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::from_code(ErrorCode::ServiceUnavailable),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Shortcut for handlers that need a custom status and message pair without
/// going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::with_message(error_code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_answers_404() {
        let response = AppError::NotFound("no product with id xyz".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_answers_400() {
        let response = AppError::BadRequest("price must be >= 0".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_error_answers_500() {
        let response =
            AppError::InternalServerError("connection reset".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
