use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::filter::Document;

/// Field holding the encoded password. Never returned to clients.
pub const PASSWORD_FIELD: &str = "password";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Always stored lowercase.
    pub email: String,
    /// `PasswordCodec` output.
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Sign-up payload fields with no dedicated column, kept verbatim.
    #[serde(flatten)]
    pub extra: Document,
}

/// Copy of a user document that is safe to return to clients.
pub fn without_password(mut doc: Document) -> Document {
    doc.remove(PASSWORD_FIELD);
    doc
}

/// The `{id, email, name, createdAt}` summary returned by sign-in.
pub fn summary(doc: &Document) -> Value {
    let field = |key: &str| doc.get(key).cloned().unwrap_or(Value::Null);
    serde_json::json!({
        "id": field("_id"),
        "email": field("email"),
        "name": field("name"),
        "createdAt": field("createdAt"),
    })
}
