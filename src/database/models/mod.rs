pub mod cart;
pub mod order;
pub mod order_item;
pub mod product;
pub mod review;
pub mod user;

use serde::Serialize;
use serde_json::Value;

use super::filter::Document;

pub use cart::CartItem;
pub use order::Order;
pub use order_item::OrderItem;
pub use product::Product;
pub use review::Review;
pub use user::User;

/// Serialize a model into the document shape the store persists.
pub fn to_document<T: Serialize>(model: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(model)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "model serialized to {} instead of an object",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
