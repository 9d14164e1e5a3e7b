use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

/// In-process store engine: a map of collections, each a key-ordered map of
/// JSON documents. Suitable for the expected collection sizes (low
/// thousands) and for the integration suite; the trait seam keeps a managed
/// backend swappable without touching the handlers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn put(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false))
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }
}
