use axum::extract::{Path, State};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use super::{with_id, AppState};
use crate::database::models::to_document;
use crate::database::{Collection, Filter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validation;

const NOT_FOUND: &str = "Item not found";

/// GET /order-items
pub async fn list(State(state): State<AppState>) -> ApiResult {
    let items = state.store.find(Collection::OrderItems, &Filter::new()).await?;

    Ok(ApiResponse::success(json!({
        "message": "Order items fetched",
        "data": items,
    })))
}

/// GET /order-items/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::OrderItems)?;

    let item = state
        .store
        .find_one(Collection::OrderItems, &Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(ApiResponse::success(json!({ "data": item })))
}

/// POST /order-items
pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult {
    let item = to_document(&validation::orders::create_item(&body, Utc::now())?)?;

    let id = state.store.insert_one(Collection::OrderItems, item.clone()).await?;
    info!("Created order item {}", id);

    Ok(ApiResponse::created(json!({
        "message": "Order item created successfully",
        "data": with_id(id, item),
    })))
}

/// PUT /order-items/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult {
    let id = validation::object_id(&id, Collection::OrderItems)?;
    let set = validation::orders::update_item(&body, Utc::now());

    let result = state
        .store
        .update_one(Collection::OrderItems, &Filter::by_id(id), set)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(ApiResponse::success(json!({
        "message": "Order item updated",
        "updatedCount": result.modified_count,
    })))
}

/// DELETE /order-items/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::OrderItems)?;

    let deleted = state
        .store
        .delete_one(Collection::OrderItems, &Filter::by_id(id))
        .await?;
    if deleted == 0 {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(ApiResponse::success(json!({
        "message": "Order item deleted",
        "deletedCount": deleted,
    })))
}
