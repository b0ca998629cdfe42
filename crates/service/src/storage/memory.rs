use async_trait::async_trait;
use models::Document;
use tokio::sync::RwLock;

use super::collections::Collections;
use super::{DocumentBackend, Query, StoredDocument};
use crate::errors::StoreError;

/// In-process document backend.
///
/// Keys are random v4 UUIDs in simple form, so concurrent inserts never
/// collide. Nothing survives the process.
#[derive(Default)]
pub struct MemoryBackend {
    inner: RwLock<Collections>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        self.inner.write().await.insert(collection, doc)
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        self.inner.read().await.query(collection, query)
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        self.inner.write().await.update(collection, id, fields)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.inner.write().await.delete(collection, id)
    }
}
