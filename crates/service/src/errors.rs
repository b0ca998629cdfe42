use thiserror::Error;

/// Failure surfaced by a document backend, passed through unchanged by the
/// store-access layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("malformed document: {0}")]
    Malformed(String),
    #[error("io error: {0}")]
    Io(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound { collection: collection.to_string(), id: id.to_string() }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            StoreError::NotFound { .. } => 2001,
            StoreError::PermissionDenied(_) => 2002,
            StoreError::InvalidQuery(_) => 2003,
            StoreError::Unavailable(_) => 2101,
            StoreError::Malformed(_) => 2102,
            StoreError::Io(_) => 2103,
        }
    }
}

impl From<models::ModelError> for StoreError {
    fn from(e: models::ModelError) -> Self {
        Self::Malformed(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
