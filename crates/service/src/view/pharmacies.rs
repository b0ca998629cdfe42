use std::sync::Arc;

use models::{NewPharmacy, Pharmacy};
use tokio::sync::watch;

use super::{StateCell, ViewState, ADD_PHARMACY_FAILED, FETCH_PHARMACIES_FAILED, GET_PHARMACY_FAILED};
use crate::catalog::CatalogStore;
use crate::errors::StoreError;
use crate::storage::DocumentBackend;

/// Observable pharmacy list. Nothing is fetched until
/// [`PharmaciesView::fetch_pharmacies`] is called.
pub struct PharmaciesView<B: DocumentBackend + ?Sized> {
    store: Arc<CatalogStore<B>>,
    state: StateCell<Pharmacy>,
}

impl<B: DocumentBackend + ?Sized> PharmaciesView<B> {
    pub fn new(store: Arc<CatalogStore<B>>) -> Self {
        Self { store, state: StateCell::new(ViewState::new(false)) }
    }

    pub fn state(&self) -> ViewState<Pharmacy> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Pharmacy>> {
        self.state.subscribe()
    }

    pub async fn fetch_pharmacies(&self) {
        self.state.fetch(self.store.get_pharmacies(), FETCH_PHARMACIES_FAILED).await;
    }

    /// Passthrough lookup; leaves `data` alone.
    pub async fn get_pharmacy_by_email(&self, email: &str) -> Result<Option<Pharmacy>, StoreError> {
        self.store
            .get_pharmacy_by_email(email)
            .await
            .map_err(|e| self.state.fail(GET_PHARMACY_FAILED, e))
    }

    /// Persist a pharmacy and append it locally; returns the new id.
    pub async fn add_pharmacy(&self, pharmacy: NewPharmacy) -> Result<String, StoreError> {
        let id = self
            .store
            .add_pharmacy(&pharmacy)
            .await
            .map_err(|e| self.state.fail(ADD_PHARMACY_FAILED, e))?;
        let record = pharmacy.into_pharmacy(id.clone());
        self.state.modify(|s| s.data.push(record));
        Ok(id)
    }
}
