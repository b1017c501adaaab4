use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::ErrorDetails;

/// Development-only layer: re-render 500 responses with the internal error text.
pub async fn expose_error_details(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorDetails>() {
        Some(ErrorDetails { message, details }) => (
            response.status(),
            Json(json!({ "error": message, "details": details })),
        )
            .into_response(),
        None => response,
    }
}
