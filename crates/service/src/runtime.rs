//! Runtime wiring
//!
//! Builds the configured backend and catalog so binary crates only need
//! `configs` and `service`.

use std::path::Path;
use std::sync::Arc;

use configs::{BackendKind, StoreConfig};
use tracing::info;

use crate::catalog::{CatalogStore, CollectionNames};
use crate::storage::{DocumentBackend, JsonFileBackend, MemoryBackend};

/// Open the backend selected by `store.backend`.
pub async fn open_backend(cfg: &StoreConfig) -> anyhow::Result<Arc<dyn DocumentBackend>> {
    let backend: Arc<dyn DocumentBackend> = match cfg.backend {
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
        BackendKind::JsonFile => {
            let path = Path::new(&cfg.path);
            common::env::ensure_data_dir(path).await?;
            JsonFileBackend::new(path).await?
        }
    };
    info!(backend = ?cfg.backend, path = %cfg.path, "document_backend_opened");
    Ok(backend)
}

/// Open the backend and wrap it in a catalog store using the configured
/// collection names.
pub async fn open_catalog(cfg: &StoreConfig) -> anyhow::Result<Arc<CatalogStore<dyn DocumentBackend>>> {
    let backend = open_backend(cfg).await?;
    let collections = CollectionNames {
        products: cfg.products_collection.clone(),
        pharmacies: cfg.pharmacies_collection.clone(),
    };
    Ok(Arc::new(CatalogStore::with_collections(backend, collections)))
}
