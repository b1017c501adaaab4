use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::coerce::{is_truthy, parse_float, parse_int};
use super::{strip_server_fields, timestamp, ValidationError};
use crate::database::models::order::{DEFAULT_PAYMENT_METHOD, DEFAULT_STATUS};
use crate::database::models::{Order, OrderItem};
use crate::database::{Document, ID_FIELD};

/// Validate a checkout payload. `totalAmount` may be `0`.
pub fn create(body: &Document, now: DateTime<Utc>) -> Result<Order, ValidationError> {
    let items = match body.get("items") {
        Some(Value::Array(items)) if !items.is_empty() => items.clone(),
        _ => return Err(ValidationError::InvalidOrder),
    };
    if !is_truthy(body.get("userId")) {
        return Err(ValidationError::InvalidOrder);
    }

    let total_amount = match body.get("totalAmount") {
        None | Some(Value::Null) => return Err(ValidationError::MissingTotalAmount),
        Some(v) => parse_float(v).ok_or(ValidationError::InvalidTotalAmount)?,
    };

    let or_default = |key: &str, default: Value| match body.get(key) {
        None | Some(Value::Null) => default,
        Some(v) => v.clone(),
    };

    Ok(Order {
        user_id: body["userId"].clone(),
        items,
        total_amount,
        status: or_default("status", json!(DEFAULT_STATUS)),
        delivery_data: or_default("deliveryData", json!({})),
        payment_method: or_default("paymentMethod", json!(DEFAULT_PAYMENT_METHOD)),
        created_at: now,
        updated_at: now,
    })
}

/// Shallow `$set` for an order: whatever the client sent, minus `_id`.
pub fn update(body: &Document, now: DateTime<Utc>) -> Result<Document, ValidationError> {
    let mut set = body.clone();
    set.remove(ID_FIELD);

    if is_truthy(set.get("totalAmount")) {
        let total = set
            .get("totalAmount")
            .and_then(parse_float)
            .ok_or(ValidationError::InvalidTotalAmount)?;
        set.insert("totalAmount".into(), json!(total));
    }

    set.insert("updatedAt".into(), timestamp(now));
    Ok(set)
}

/// Validate an order line.
pub fn create_item(body: &Document, now: DateTime<Utc>) -> Result<OrderItem, ValidationError> {
    if ["orderId", "productId", "quantity", "price"]
        .iter()
        .any(|key| !is_truthy(body.get(*key)))
    {
        return Err(ValidationError::MissingOrderItemFields);
    }

    let quantity = parse_int(&body["quantity"]).ok_or(ValidationError::InvalidOrderItemNumbers)?;
    let price = parse_float(&body["price"]).ok_or(ValidationError::InvalidOrderItemNumbers)?;

    Ok(OrderItem {
        order_id: body["orderId"].clone(),
        product_id: body["productId"].clone(),
        quantity,
        price,
        created_at: now,
    })
}

pub fn update_item(body: &Document, now: DateTime<Utc>) -> Document {
    let mut set = strip_server_fields(body.clone());
    set.insert("updatedAt".into(), timestamp(now));
    set
}
