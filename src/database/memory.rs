use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::collection::Collection;
use super::filter::{Document, Filter, ID_FIELD};
use super::object_id::ObjectId;
use super::store::{DocumentStore, StoreError, UpdateResult};

/// Process-local document store. Each collection is a vector kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: Collection) -> usize {
        let collections = self.collections.read().await;
        collections.get(&collection).map_or(0, |docs| docs.len())
    }

    fn stamp(mut doc: Document, id: ObjectId) -> Document {
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
        doc
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .push(Self::stamp(doc, id));
        Ok(id)
    }

    async fn insert_many(&self, collection: Collection, docs: Vec<Document>) -> Result<Vec<ObjectId>, StoreError> {
        let mut collections = self.collections.write().await;
        let stored = collections.entry(collection).or_default();
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = ObjectId::new();
            stored.push(Self::stamp(doc, id));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        mut set: Document,
    ) -> Result<UpdateResult, StoreError> {
        set.remove(ID_FIELD);

        let mut collections = self.collections.write().await;
        let Some(target) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(UpdateResult::default());
        };

        let mut modified = false;
        for (key, value) in set {
            if target.get(&key) != Some(&value) {
                target.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
