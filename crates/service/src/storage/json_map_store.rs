use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::Document;
use tokio::{fs, sync::RwLock};

use super::collections::Collections;
use super::{DocumentBackend, Query, StoredDocument};
use crate::errors::StoreError;

/// JSON file-backed document backend.
///
/// Holds every collection in memory and rewrites the whole file after each
/// write. Intended for local runs and demos where a hosted store is overkill.
#[derive(Clone)]
pub struct JsonFileBackend {
    inner: Arc<RwLock<Collections>>,
    file_path: PathBuf,
}

impl JsonFileBackend {
    /// Open the store at a path. Creates the file with no collections if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let collections: Collections = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Malformed(format!("{}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = Collections::default();
                fs::write(&file_path, encode(&empty)?).await?;
                empty
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(collections)), file_path }))
    }

    /// Apply a mutation and persist while still holding the write lock, so
    /// the file never lags behind a later write.
    async fn write_with<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Collections) -> Result<T, StoreError>,
    {
        let mut collections = self.inner.write().await;
        let mut staged = collections.clone();
        let out = f(&mut staged)?;
        fs::write(&self.file_path, encode(&staged)?).await?;
        *collections = staged;
        Ok(out)
    }
}

fn encode(collections: &Collections) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(collections).map_err(|e| StoreError::Malformed(e.to_string()))
}

#[async_trait]
impl DocumentBackend for JsonFileBackend {
    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        self.write_with(|c| c.insert(collection, doc)).await
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        self.inner.read().await.query(collection, query)
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        self.write_with(|c| c.update(collection, id, fields)).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.write_with(|c| c.delete(collection, id)).await
    }
}
