use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DocumentStore, StoreError};

/// Typed view over one collection of a [`DocumentStore`].
pub struct Collection<T> {
    name: &'static str,
    store: Arc<dyn DocumentStore>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            store: Arc::clone(&self.store),
            _phantom: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(name: &'static str, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            name,
            store,
            _phantom: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(self.name, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// Like `get`, but a missing document is an error the caller can map
    /// straight to a 404 response.
    pub async fn get_404(&self, id: &str) -> Result<T, StoreError> {
        self.get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", self.name, id)))
    }

    pub async fn put(&self, id: &str, record: &T) -> Result<(), StoreError> {
        let doc = serde_json::to_value(record)?;
        self.store.put(self.name, id, doc).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete(self.name, id).await
    }

    pub async fn scan(&self) -> Result<Vec<T>, StoreError> {
        let docs = self.store.scan(self.name).await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }
}
