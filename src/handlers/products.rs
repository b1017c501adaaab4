use axum::extract::{Path, State};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use super::AppState;
use crate::database::models::to_document;
use crate::database::{Collection, Filter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validation;

/// GET /products
pub async fn list(State(state): State<AppState>) -> ApiResult {
    let products = state.store.find(Collection::Products, &Filter::new()).await?;

    Ok(ApiResponse::success(json!({
        "message": "Products fetched successfully",
        "data": products,
    })))
}

/// GET /products/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::Products)?;

    let product = state
        .store
        .find_one(Collection::Products, &Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(ApiResponse::success(json!({ "data": product })))
}

/// POST /products
pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult {
    let product = validation::products::create(&body, Utc::now())?;

    let id = state
        .store
        .insert_one(Collection::Products, to_document(&product)?)
        .await?;
    info!("Created product {}", id);

    Ok(ApiResponse::created(json!({
        "message": "Product created successfully",
        "data": {
            "_id": id,
            "name": product.name,
            "price": product.price,
            "category": product.category,
        },
    })))
}

/// PUT /products/:id - Partial update of the provided, non-empty fields
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult {
    let id = validation::object_id(&id, Collection::Products)?;
    let set = validation::products::update(&body)?;

    let result = state
        .store
        .update_one(Collection::Products, &Filter::by_id(id), set)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(ApiResponse::success(json!({
        "message": "Product updated successfully",
        "modifiedCount": result.modified_count,
    })))
}

/// DELETE /products/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::Products)?;

    if state.store.delete_one(Collection::Products, &Filter::by_id(id)).await? == 0 {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(ApiResponse::message("Product deleted successfully"))
}
