use models::{NewPharmacy, Pharmacy};
use tracing::{error, info, instrument};

use super::{decode_all, CatalogStore, FIELD_EMAIL};
use crate::errors::StoreError;
use crate::storage::{DocumentBackend, Query};

impl<B: DocumentBackend + ?Sized> CatalogStore<B> {
    #[instrument(skip(self, pharmacy), fields(email = %pharmacy.email))]
    pub async fn add_pharmacy(&self, pharmacy: &NewPharmacy) -> Result<String, StoreError> {
        let result: Result<String, StoreError> = async {
            let doc = self.new_document(pharmacy)?;
            self.backend.insert(&self.collections.pharmacies, doc).await
        }
        .await;
        match &result {
            Ok(id) => info!(pharmacy_id = %id, "pharmacy_added"),
            Err(e) => error!(error = %e, "error adding pharmacy"),
        }
        result
    }

    /// All pharmacies in backend order.
    #[instrument(skip(self))]
    pub async fn get_pharmacies(&self) -> Result<Vec<Pharmacy>, StoreError> {
        let result: Result<Vec<Pharmacy>, StoreError> = async {
            let docs = self.backend.query(&self.collections.pharmacies, &Query::all()).await?;
            Ok(decode_all(docs))
        }
        .await;
        result.inspect_err(|e| error!(error = %e, "error getting pharmacies"))
    }

    /// First pharmacy whose `email` matches exactly, or `None`.
    ///
    /// Email uniqueness is a convention; with duplicates the backend's first
    /// match wins.
    #[instrument(skip(self))]
    pub async fn get_pharmacy_by_email(&self, email: &str) -> Result<Option<Pharmacy>, StoreError> {
        let result: Result<Option<Pharmacy>, StoreError> = async {
            let query = Query::all().where_eq(FIELD_EMAIL, email);
            let docs = self.backend.query(&self.collections.pharmacies, &query).await?;
            Ok(decode_all::<Pharmacy>(docs).into_iter().next())
        }
        .await;
        result.inspect_err(|e| error!(error = %e, "error getting pharmacy by email"))
    }
}
