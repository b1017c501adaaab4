use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::database::Document;
use crate::error::ApiError;

/// JSON object request body.
///
/// Replaces `axum::Json` so malformed, missing or non-object bodies are
/// reported in the API's `{"error": ...}` shape instead of plain text.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Document);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonBody(map)),
            _ => Err(ApiError::invalid_json("Request body must be a JSON object")),
        }
    }
}
