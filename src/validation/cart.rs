use serde_json::Value;

use super::coerce::is_truthy;
use super::{strip_server_fields, ValidationError};
use crate::database::models::CartItem;
use crate::database::Document;

/// Validate a cart addition. A quantity of `0` counts as missing.
pub fn add(body: &Document) -> Result<CartItem, ValidationError> {
    if !is_truthy(body.get("productId")) || !is_truthy(body.get("quantity")) {
        return Err(ValidationError::MissingCartFields);
    }

    let mut extra = strip_server_fields(body.clone());
    let product_id = extra.remove("productId").unwrap_or(Value::Null);
    let quantity = extra.remove("quantity").unwrap_or(Value::Null);

    Ok(CartItem {
        product_id,
        quantity,
        extra,
    })
}

/// The new quantity for a cart row, stored as sent.
pub fn quantity(body: &Document) -> Result<Value, ValidationError> {
    match body.get("quantity") {
        Some(q) if is_truthy(Some(q)) => Ok(q.clone()),
        _ => Err(ValidationError::MissingQuantity),
    }
}
