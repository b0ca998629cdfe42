//! Fault-injecting backend for tests and doc examples.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use models::Document;
use tokio::sync::Notify;

use super::{DocumentBackend, MemoryBackend, Query, StoredDocument};
use crate::errors::StoreError;

/// Wraps a `MemoryBackend` and fails every call while switched on.
#[derive(Default)]
pub struct FlakyBackend {
    inner: MemoryBackend,
    failing: AtomicBool,
    queries: AtomicUsize,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle failure injection for all subsequent calls.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of queries received, failed ones included.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Make subsequent queries wait until the returned handle is notified,
    /// one `notify_one` per query.
    pub fn hold_queries(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        if let Ok(mut slot) = self.gate.lock() {
            *slot = Some(gate.clone());
        }
        gate
    }

    /// Let queries through immediately again.
    pub fn release_queries(&self) {
        if let Ok(mut slot) = self.gate.lock() {
            *slot = None;
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for FlakyBackend {
    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        self.check()?;
        self.inner.insert(collection, doc).await
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().ok().and_then(|slot| slot.clone());
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check()?;
        self.inner.query(collection, query).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        self.check()?;
        self.inner.update(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(collection, id).await
    }
}
