//! Cart rows are addressed by `productId`, not by `_id`. When several rows
//! share a product id, update and delete act on the oldest one.

use axum::extract::{Path, State};
use serde_json::json;
use tracing::info;

use super::{with_id, AppState};
use crate::database::models::to_document;
use crate::database::{Collection, Document, Filter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validation;

/// GET /cart
pub async fn list(State(state): State<AppState>) -> ApiResult {
    let items = state.store.find(Collection::Cart, &Filter::new()).await?;

    Ok(ApiResponse::success(json!({
        "message": "Cart fetched successfully",
        "data": items,
    })))
}

/// POST /cart
pub async fn add(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult {
    let item = to_document(&validation::cart::add(&body)?)?;

    let id = state.store.insert_one(Collection::Cart, item.clone()).await?;
    info!("Added cart item {}", id);

    Ok(ApiResponse::created(json!({
        "message": "Item added to cart successfully",
        "data": with_id(id, item),
    })))
}

/// PUT /cart/:productId - Replace the quantity
pub async fn update(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult {
    let quantity = validation::cart::quantity(&body)?;

    let mut set = Document::new();
    set.insert("quantity".into(), quantity);

    let result = state
        .store
        .update_one(Collection::Cart, &Filter::new().eq("productId", product_id), set)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found("Item not found in cart"));
    }

    Ok(ApiResponse::success(json!({
        "message": "Cart item updated successfully",
        "updated": result.modified_count,
    })))
}

/// DELETE /cart/:productId
pub async fn delete(State(state): State<AppState>, Path(product_id): Path<String>) -> ApiResult {
    let deleted = state
        .store
        .delete_one(Collection::Cart, &Filter::new().eq("productId", product_id))
        .await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Item not found in cart"));
    }

    Ok(ApiResponse::success(json!({
        "message": "Cart item deleted successfully",
        "deleted": deleted,
    })))
}
