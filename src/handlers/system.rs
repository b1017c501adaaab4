use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use super::AppState;

/// GET / - Service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Storefront API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/signup, /signin, /checkpassword",
            "users": "/users[/:id]",
            "products": "/products[/:id]",
            "cart": "/cart[/:productId]",
            "orders": "/orders[/:id]",
            "order_items": "/order-items[/:id]",
            "reviews": "/reviews[/:id]",
        }
    }))
}

/// GET /health - Store liveness
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "error": "database unavailable" })),
            )
        }
    }
}
