use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::filter::Document;

/// A cart row. Addressed by `productId`; the client's values are stored as sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: Value,
    pub quantity: Value,
    /// Anything else the client attached (e.g. `userId`).
    #[serde(flatten)]
    pub extra: Document,
}
