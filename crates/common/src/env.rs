//! Environment/runtime helpers
//!
//! Sanity checks to ensure the data directory exists at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the parent directory of a data file exists; note when the file
/// itself is missing and will be created empty.
pub async fn ensure_data_dir(data_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(data_path).await.is_err() {
        warn!(path = %data_path.display(), "data file not found; starting with an empty catalog");
    } else {
        info!(path = %data_path.display(), "using existing data file");
    }
    Ok(())
}
