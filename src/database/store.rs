use async_trait::async_trait;
use thiserror::Error;

use super::collection::Collection;
use super::filter::{Document, Filter};
use super::object_id::ObjectId;

/// Errors from a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Corrupt document in {collection}: {message}")]
    CorruptDocument {
        collection: &'static str,
        message: String,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Outcome of a single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Filter-based access to named document collections.
///
/// `update_one` and `delete_one` act on the first match in insertion order.
/// `update_one` applies `set` as a shallow field overwrite; keys absent from
/// `set` keep their stored values.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All matching documents in insertion order.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError>;

    /// Insert a document, assigning a fresh identifier. Any `_id` in `doc` is discarded.
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<ObjectId, StoreError>;

    async fn insert_many(&self, collection: Collection, docs: Vec<Document>) -> Result<Vec<ObjectId>, StoreError>;

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StoreError>;

    /// Returns the number of deleted documents (0 or 1).
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
