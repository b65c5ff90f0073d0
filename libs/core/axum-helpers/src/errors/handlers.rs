use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{ErrorCode, ErrorResponse};

/// Fallback handler producing a structured 404 body for unknown paths.
pub async fn not_found() -> Response {
    let body = ErrorResponse {
        code: ErrorCode::NotFound.code(),
        error: ErrorCode::NotFound.as_str().to_string(),
        message: "The requested resource was not found".to_string(),
        details: None,
    };

    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
