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
pub struct OrderQuery {
    pub user_id: Option<String>,
}

/// GET /orders[?userId=] - All orders, optionally for one user
pub async fn list(State(state): State<AppState>, Query(query): Query<OrderQuery>) -> ApiResult {
    let filter = match query.user_id.filter(|u| !u.is_empty()) {
        Some(user_id) => Filter::new().eq("userId", user_id),
        None => Filter::new(),
    };
    let orders = state.store.find(Collection::Orders, &filter).await?;

    Ok(ApiResponse::success(json!({
        "message": "Orders fetched successfully",
        "data": orders,
    })))
}

/// GET /orders/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::Orders)?;

    let order = state
        .store
        .find_one(Collection::Orders, &Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;

    Ok(ApiResponse::success(json!({ "data": order })))
}

/// POST /orders - Checkout
///
/// Stock is not adjusted; the order is a single insert.
pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult {
    let order = to_document(&validation::orders::create(&body, Utc::now())?)?;

    let id = state.store.insert_one(Collection::Orders, order.clone()).await?;
    info!("Created order {}", id);

    Ok(ApiResponse::created(json!({
        "message": "Order created successfully",
        "data": with_id(id, order),
    })))
}

/// PUT /orders/:id - Shallow overwrite of the provided fields
///
/// `status` is free-form; any value may replace any other.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult {
    let id = validation::object_id(&id, Collection::Orders)?;
    let set = validation::orders::update(&body, Utc::now())?;

    let result = state
        .store
        .update_one(Collection::Orders, &Filter::by_id(id), set)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found("Order not found"));
    }

    Ok(ApiResponse::success(json!({
        "message": "Order updated successfully",
        "modifiedCount": result.modified_count,
    })))
}

/// DELETE /orders/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::Orders)?;

    if state.store.delete_one(Collection::Orders, &Filter::by_id(id)).await? == 0 {
        return Err(ApiError::not_found("Order not found"));
    }

    Ok(ApiResponse::message("Order deleted successfully"))
}
