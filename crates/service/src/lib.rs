//! Service layer for the pharmacy catalog.
//! - `storage`: the document backend seam and bundled backends.
//! - `catalog`: typed store access for products and pharmacies.
//! - `view`: observable data/loading/error state for a presentation layer.

pub mod catalog;
pub mod clock;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod view;

pub use catalog::{CatalogStore, CollectionNames};
pub use errors::StoreError;
pub use storage::{DocumentBackend, JsonFileBackend, MemoryBackend};
pub use view::{PharmaciesView, ProductsView, ViewState};
