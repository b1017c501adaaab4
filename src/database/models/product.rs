use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub description: String,
    /// Negative values are accepted as given.
    pub price: f64,
    pub category: String,
    pub image_url: String,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
}
