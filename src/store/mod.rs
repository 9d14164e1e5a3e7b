// Document store seam.
//
// The production system persists to a managed key-value document store; the
// handlers only ever do a single get/put/delete/scan per request. That
// surface is captured in `DocumentStore`, with `MemoryStore` as the
// in-process engine and `Collection<T>` as the typed wrapper handlers use.

pub mod collection;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Key-value document storage, one JSON document per (collection, id).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or overwrite; last writer wins.
    async fn put(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError>;

    /// Hard delete. Returns whether a document was removed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Unfiltered full scan of a collection, in stable key order.
    async fn scan(&self, collection: &str) -> Result<Vec<Value>, StoreError>;
}

pub use collection::Collection;
pub use memory::MemoryStore;
