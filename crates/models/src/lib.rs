//! Catalog record types shared by the store-access and view layers.
//! - `Product` / `Pharmacy` are the records handed to callers.
//! - `New*` inputs carry every field except the backend-assigned id.
//! - `ProductPatch` carries the fields of a partial product update.

pub mod document;
pub mod errors;
pub mod pharmacy;
pub mod product;

pub use document::{Document, FIELD_CREATED_AT, FIELD_UPDATED_AT};
pub use errors::ModelError;
pub use pharmacy::{NewPharmacy, Pharmacy};
pub use product::{NewProduct, Product, ProductPatch};
