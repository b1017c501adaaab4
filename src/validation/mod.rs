//! Request payload validation.
//!
//! Every function here is pure: it takes the decoded JSON body (plus the
//! request timestamp where the result carries one) and returns either the
//! normalized model / update set or a [`ValidationError`] naming the
//! offending fields. Nothing in this module touches the store.

pub mod auth;
pub mod cart;
pub mod coerce;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use thiserror::Error;

use crate::database::{Collection, Document, ObjectId, ID_FIELD};

pub const SIGN_UP_MIN_PASSWORD: usize = 8;
pub const PROFILE_MIN_PASSWORD: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Valid email is required")]
    EmailRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Name, email, and password are required")]
    MissingUserFields,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name, price, and category are required")]
    MissingProductFields,

    #[error("price must be a number")]
    InvalidPrice,

    #[error("stock must be an integer")]
    InvalidStock,

    #[error("No valid fields to update")]
    NoUpdatableFields,

    #[error("Missing productId or quantity")]
    MissingCartFields,

    #[error("Missing quantity in request body")]
    MissingQuantity,

    #[error("userId and items array are required")]
    InvalidOrder,

    #[error("totalAmount is required")]
    MissingTotalAmount,

    #[error("totalAmount must be a number")]
    InvalidTotalAmount,

    #[error("orderId, productId, quantity, and price are required")]
    MissingOrderItemFields,

    #[error("quantity must be an integer and price a number")]
    InvalidOrderItemNumbers,

    #[error("productId, userId, and rating are required")]
    MissingReviewFields,

    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("Invalid {} ID", .0.label())]
    InvalidId(Collection),
}

impl ValidationError {
    /// Payload fields (or path parameter) the failure refers to.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ValidationError::MissingCredentials => &["email", "password"],
            ValidationError::PasswordTooShort { .. } => &["password"],
            ValidationError::InvalidEmailFormat | ValidationError::EmailRequired => &["email"],
            ValidationError::PasswordMismatch => &["password", "confirmPassword"],
            ValidationError::MissingUserFields => &["name", "email", "password"],
            ValidationError::EmptyName => &["name"],
            ValidationError::MissingProductFields => &["name", "price", "category"],
            ValidationError::InvalidPrice => &["price"],
            ValidationError::InvalidStock => &["stock"],
            ValidationError::NoUpdatableFields => &[],
            ValidationError::MissingCartFields => &["productId", "quantity"],
            ValidationError::MissingQuantity => &["quantity"],
            ValidationError::InvalidOrder => &["userId", "items"],
            ValidationError::MissingTotalAmount | ValidationError::InvalidTotalAmount => &["totalAmount"],
            ValidationError::MissingOrderItemFields => &["orderId", "productId", "quantity", "price"],
            ValidationError::InvalidOrderItemNumbers => &["quantity", "price"],
            ValidationError::MissingReviewFields => &["productId", "userId", "rating"],
            ValidationError::RatingOutOfRange => &["rating"],
            ValidationError::InvalidId(_) => &["id"],
        }
    }
}

/// Validate a path identifier before any store access.
pub fn object_id(raw: &str, collection: Collection) -> Result<ObjectId, ValidationError> {
    ObjectId::parse(raw).map_err(|_| ValidationError::InvalidId(collection))
}

/// Client-supplied keys that only the server may set.
const SERVER_FIELDS: &[&str] = &[ID_FIELD, "createdAt", "updatedAt"];

/// Drop server-owned keys from a pass-through payload.
pub(crate) fn strip_server_fields(mut doc: Document) -> Document {
    for key in SERVER_FIELDS {
        doc.remove(*key);
    }
    doc
}

/// JSON form of a server-set timestamp, identical to how models serialize theirs.
pub(crate) fn timestamp(now: DateTime<Utc>) -> Value {
    json!(now)
}

/// Non-empty string value of `key`, if any.
pub(crate) fn text<'a>(body: &'a Document, key: &str) -> Option<&'a str> {
    body.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}
