//! JSON extractor that validates the body before the handler runs.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON body extractor with `validator`-based validation.
///
/// Rejects with a structured 400 response on either a malformed body or
/// a constraint violation; validation failures carry field-level details.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1))]
///     name: String,
///     #[validate(range(min = 0.0))]
///     price: f64,
/// }
///
/// async fn create_product(ValidatedJson(payload): ValidatedJson<CreateProduct>) -> String {
///     format!("Creating product: {}", payload.name)
/// }
///
/// let app = Router::new().route("/products", post(create_product));
/// ```
pub struct ValidatedJson<T>(pub T);

/// Flatten `ValidationErrors` into a field -> [error] JSON map.
fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let map = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages: Vec<serde_json::Value> = field_errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::json!(messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(map)
}

fn bad_request(code: ErrorCode, message: String, details: Option<serde_json::Value>) -> Response {
    let body = ErrorResponse {
        code: code.code(),
        error: code.as_str().to_string(),
        message,
        details,
    };
    (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // All body rejections map to 400; axum's default is 422 for data errors
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| bad_request(ErrorCode::InvalidJson, e.body_text(), None))?;

        data.validate().map_err(|e| {
            bad_request(
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message().to_string(),
                Some(validation_details(&e)),
            )
        })?;

        Ok(ValidatedJson(data))
    }
}
