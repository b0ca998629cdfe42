//! Record store access: typed catalog operations over a `DocumentBackend`.
//!
//! Each operation is exactly one backend round-trip. Backend failures are
//! logged and returned unchanged; nothing is retried.

mod pharmacies;
mod products;

use std::sync::Arc;

use models::document::{from_document, timestamp_value, to_document};
use models::{Document, FIELD_CREATED_AT, FIELD_UPDATED_AT};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::errors::StoreError;
use crate::storage::{DocumentBackend, StoredDocument};

pub const FIELD_PHARMACY_ID: &str = "pharmacyId";
pub const FIELD_EMAIL: &str = "email";

/// Collection names the catalog reads and writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionNames {
    pub products: String,
    pub pharmacies: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self { products: "products".into(), pharmacies: "pharmacies".into() }
    }
}

/// Store access for products and pharmacies.
///
/// Works with a concrete backend (`CatalogStore<MemoryBackend>`) or a
/// runtime-selected one (`CatalogStore<dyn DocumentBackend>`).
pub struct CatalogStore<B: DocumentBackend + ?Sized> {
    backend: Arc<B>,
    collections: CollectionNames,
    clock: Arc<dyn Clock>,
}

impl<B: DocumentBackend + ?Sized> CatalogStore<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_collections(backend, CollectionNames::default())
    }

    pub fn with_collections(backend: Arc<B>, collections: CollectionNames) -> Self {
        Self { backend, collections, clock: Arc::new(SystemClock::default()) }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Encode a new record with `createdAt`/`updatedAt` set to call time.
    fn new_document<T: Serialize>(&self, input: &T) -> Result<Document, StoreError> {
        let mut doc = to_document(input)?;
        let now = timestamp_value(self.clock.now());
        doc.insert(FIELD_CREATED_AT.to_string(), now.clone());
        doc.insert(FIELD_UPDATED_AT.to_string(), now);
        Ok(doc)
    }

    /// Encode a partial update with `updatedAt` refreshed to call time.
    fn patch_document<T: Serialize>(&self, patch: &T) -> Result<Document, StoreError> {
        let mut doc = to_document(patch)?;
        doc.insert(FIELD_UPDATED_AT.to_string(), timestamp_value(self.clock.now()));
        Ok(doc)
    }
}

/// Decode stored documents, skipping any that do not fit the record shape.
fn decode_all<T: DeserializeOwned>(docs: Vec<StoredDocument>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|d| match from_document(&d.id, d.data) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(document_id = %d.id, error = %e, "skipping undecodable document");
                None
            }
        })
        .collect()
}
