use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub product_id: Value,
    pub user_id: Value,
    /// Between `MIN_RATING` and `MAX_RATING` inclusive.
    pub rating: i64,
    pub comment: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
