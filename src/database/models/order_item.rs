use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_id: Value,
    pub product_id: Value,
    pub quantity: i64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}
