use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

/// Successful JSON response. Handlers build the body; this only fixes the status.
#[derive(Debug)]
pub struct ApiResponse {
    pub body: Value,
    pub status_code: StatusCode,
}

impl ApiResponse {
    /// Create a successful API response with default 200 status
    pub fn success(body: Value) -> Self {
        Self::with_status(body, StatusCode::OK)
    }

    pub fn with_status(body: Value, status_code: StatusCode) -> Self {
        Self { body, status_code }
    }

    /// Create a 201 Created response
    pub fn created(body: Value) -> Self {
        Self::with_status(body, StatusCode::CREATED)
    }

    /// `{"message": ...}` with 200
    pub fn message(message: &str) -> Self {
        Self::success(json!({ "message": message }))
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.body)).into_response()
    }
}

pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
