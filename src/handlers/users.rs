use axum::extract::{Path, State};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::database::models::{to_document, user};
use crate::database::{Collection, Filter, ID_FIELD};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validation::{self, users::is_seed_request};

/// GET /users - All users, passwords stripped
pub async fn list(State(state): State<AppState>) -> ApiResult {
    let users: Vec<Value> = state
        .store
        .find(Collection::Users, &Filter::new())
        .await?
        .into_iter()
        .map(|doc| Value::Object(user::without_password(doc)))
        .collect();

    Ok(ApiResponse::success(json!({
        "message": "Users fetched successfully",
        "data": users,
    })))
}

/// GET /users/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::Users)?;

    let doc = state
        .store
        .find_one(Collection::Users, &Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(json!({ "data": user::without_password(doc) })))
}

/// POST /users - Admin-style create, or seed fixtures when `test: true`
pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult {
    let now = Utc::now();

    if is_seed_request(&body) {
        let docs = validation::users::seed_users(now)
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;
        let ids = state.store.insert_many(Collection::Users, docs).await?;
        info!("Seeded {} test users", ids.len());

        return Ok(ApiResponse::created(json!({
            "message": "Test users created successfully",
            "insertedCount": ids.len(),
            "insertedIds": ids,
        })));
    }

    let new_user = validation::users::create(&body, now)?;

    let by_email = Filter::new().eq("email", new_user.email.as_str());
    if state.store.find_one(Collection::Users, &by_email).await?.is_some() {
        return Err(ApiError::conflict("User already exists"));
    }

    let id = state
        .store
        .insert_one(Collection::Users, to_document(&new_user)?)
        .await?;
    info!("Created user {}", id);

    Ok(ApiResponse::created(json!({
        "message": "User created successfully",
        "data": {
            "_id": id,
            "name": new_user.name,
            "email": new_user.email,
            "role": new_user.role,
        },
    })))
}

/// PUT /users/:id - Profile update
///
/// Name is trimmed, email re-checked for uniqueness against other users,
/// password re-encoded. Returns the updated user without its password.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult {
    let id = validation::object_id(&id, Collection::Users)?;
    let by_id = Filter::by_id(id);

    if state.store.find_one(Collection::Users, &by_id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    let changes = validation::users::update(&body, Utc::now())?;

    if let Some(email) = changes.email.as_deref() {
        let taken = Filter::new().eq("email", email).ne(ID_FIELD, id.to_hex());
        if state.store.find_one(Collection::Users, &taken).await?.is_some() {
            return Err(ApiError::conflict("Email already exists"));
        }
    }

    let result = state
        .store
        .update_one(Collection::Users, &by_id, changes.set)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found("User not found"));
    }
    if result.modified_count == 0 {
        return Err(ApiError::bad_request("No changes were made"));
    }

    let updated = state
        .store
        .find_one(Collection::Users, &by_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "User updated successfully",
        "user": user::without_password(updated),
    })))
}

/// DELETE /users/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = validation::object_id(&id, Collection::Users)?;

    if state.store.delete_one(Collection::Users, &Filter::by_id(id)).await? == 0 {
        return Err(ApiError::not_found("User not found"));
    }
    info!("Deleted user {}", id);

    Ok(ApiResponse::message("User deleted successfully"))
}
