//! Document backend abstraction for the store-access layer.
//!
//! `DocumentBackend` is the only seam between entity logic and storage. Any
//! document-oriented store offering insert, equality/ordering queries,
//! partial update and delete can sit behind it.
//!
//! Implementations:
//! - `MemoryBackend`: in-process collections
//! - `JsonFileBackend`: the same collections persisted to one JSON file
//! - `mock::FlakyBackend`: fault injection for tests and doc examples

mod collections;
pub mod json_map_store;
pub mod memory;
pub mod mock;

use async_trait::async_trait;
use models::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::StoreError;

pub use json_map_store::JsonFileBackend;
pub use memory::MemoryBackend;

/// A document together with its backend-assigned key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Equality filters plus an optional single-field ordering.
/// An empty query selects the whole collection in backend order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<OrderBy>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy { field: field.into(), direction });
        self
    }
}

/// Generic document-collection API.
///
/// Every call is a single round-trip that may fail independently; callers
/// get the failure verbatim.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Store a new document and return the key the backend assigned.
    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError>;
    /// Run a filtered and optionally ordered query.
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<StoredDocument>, StoreError>;
    /// Merge top-level fields into an existing document.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError>;
    /// Remove a document. Removing a missing key is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
