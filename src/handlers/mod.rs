pub mod auth;
pub mod cart;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod system;
pub mod users;

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::database::{Document, ObjectId, SharedStore, ID_FIELD};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: SharedStore, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// `{_id, ...doc}`, the shape create endpoints echo back.
pub(crate) fn with_id(id: ObjectId, doc: Document) -> Value {
    let mut out = Document::new();
    out.insert(ID_FIELD.to_string(), json!(id));
    out.extend(doc);
    Value::Object(out)
}
