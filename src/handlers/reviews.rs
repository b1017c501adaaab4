use axum::extract::{Path, Query, State};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{with_id, AppState};
use crate::database::models::to_document;
use crate::database::{Collection, Filter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub product_id: Option<String>,
}

/// GET /reviews[?productId=]
pub async fn list(State(state): State<AppState>, Query(query): Query<ReviewQuery>) -> ApiResult {
    let filter = match query.product_id.filter(|p| !p.is_empty()) {
        Some(product_id) => Filter::new().eq("productId", product_id),
        None => Filter::new(),
    };
    let reviews = state.store.find(Collection::Reviews, &filter).await?;

    Ok(ApiResponse::success(json!({
        "message": "Reviews fetched successfully",
        "data": reviews,
    })))
}

/// GET /reviews/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::Reviews)?;

    let review = state
        .store
        .find_one(Collection::Reviews, &Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(ApiResponse::success(json!({ "data": review })))
}

/// POST /reviews
pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult {
    let review = to_document(&validation::reviews::create(&body, Utc::now())?)?;

    let id = state.store.insert_one(Collection::Reviews, review.clone()).await?;
    info!("Added review {}", id);

    Ok(ApiResponse::created(json!({
        "message": "Review added successfully",
        "data": with_id(id, review),
    })))
}

/// PUT /reviews/:id - Change rating and/or comment
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult {
    let id = validation::object_id(&id, Collection::Reviews)?;
    let set = validation::reviews::update(&body, Utc::now())?;

    let result = state
        .store
        .update_one(Collection::Reviews, &Filter::by_id(id), set)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found("Review not found"));
    }

    Ok(ApiResponse::success(json!({
        "message": "Review updated successfully",
        "modifiedCount": result.modified_count,
    })))
}

/// DELETE /reviews/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::Reviews)?;

    if state.store.delete_one(Collection::Reviews, &Filter::by_id(id)).await? == 0 {
        return Err(ApiError::not_found("Review not found"));
    }

    Ok(ApiResponse::message("Review deleted successfully"))
}
