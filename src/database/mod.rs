pub mod collection;
pub mod filter;
pub mod memory;
pub mod models;
pub mod object_id;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::DatabaseConfig;

pub use collection::Collection;
pub use filter::{Document, Filter, FilterOp, ID_FIELD};
pub use memory::MemoryStore;
pub use object_id::{ObjectId, ObjectIdError};
pub use postgres::PgDocumentStore;
pub use store::{DocumentStore, StoreError, UpdateResult};

/// Shared handle to whichever backend the process was started with.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Open the configured backend once at startup.
///
/// With a database URL the Postgres store is connected and its tables are
/// created; without one the process runs on an in-memory store.
pub async fn connect(config: &DatabaseConfig) -> Result<SharedStore, StoreError> {
    match config.url {
        Some(_) => {
            let store = PgDocumentStore::connect(config).await?;
            store.ensure_schema().await?;
            info!("Using Postgres document store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
