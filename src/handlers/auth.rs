use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::AppState;
use crate::auth::PasswordCodec;
use crate::database::models::{to_document, user};
use crate::database::{Collection, Filter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validation;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// POST /signup - Register a new account
///
/// Email is stored lowercase; `confirmPassword` must match `password`.
/// Returns 201 with the new user id, or 409 when the email or username is taken.
pub async fn signup(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult {
    let user = validation::auth::sign_up(&body, Utc::now())?;

    // Best-effort uniqueness check; concurrent sign-ups can still race.
    let by_email = Filter::new().eq("email", user.email.as_str());
    if state.store.find_one(Collection::Users, &by_email).await?.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }
    if let Some(username) = user.username.as_deref() {
        let by_username = Filter::new().eq("username", username);
        if state.store.find_one(Collection::Users, &by_username).await?.is_some() {
            return Err(ApiError::conflict("Username already taken"));
        }
    }

    let id = state
        .store
        .insert_one(Collection::Users, to_document(&user)?)
        .await?;
    info!("User {} signed up", id);

    Ok(ApiResponse::created(json!({
        "message": "User successfully created",
        "user_id": id,
    })))
}

/// POST /signin - Check credentials
pub async fn signin(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult {
    let creds = validation::auth::sign_in(&body)?;

    let found = state
        .store
        .find_one(Collection::Users, &Filter::new().eq("email", creds.email.as_str()))
        .await?;

    // Unknown email and wrong password are indistinguishable to the caller
    let Some(doc) = found else {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };
    let stored = doc
        .get(user::PASSWORD_FIELD)
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if !PasswordCodec::verify(&creds.password, stored) {
        warn!("Failed sign-in for {}", creds.email);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    Ok(ApiResponse::success(json!({
        "message": "Login successful",
        "user": user::summary(&doc),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPasswordQuery {
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// GET /checkpassword?password=..&confirmPassword=.. - Plain-text comparison
pub async fn check_password(Query(query): Query<CheckPasswordQuery>) -> (StatusCode, &'static str) {
    let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).is_some();

    if !present(&query.password) || !present(&query.confirm_password) {
        return (
            StatusCode::BAD_REQUEST,
            "400 - Bad Request: Missing password or confirmPassword",
        );
    }
    if query.password != query.confirm_password {
        return (StatusCode::BAD_REQUEST, "400 - Passwords do not match");
    }
    (StatusCode::OK, "200 - Passwords match")
}
