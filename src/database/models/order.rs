use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_STATUS: &str = "pending";
pub const DEFAULT_PAYMENT_METHOD: &str = "pending";

/// An order created at checkout.
///
/// `status` is free-form: any value may replace any other through an update.
/// Creating an order does not touch product stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub user_id: Value,
    /// Non-empty, stored in the order given.
    pub items: Vec<Value>,
    pub total_amount: f64,
    pub status: Value,
    pub delivery_data: Value,
    pub payment_method: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
