use std::sync::Arc;

use models::{NewProduct, Product, ProductPatch};
use tokio::sync::watch;
use tracing::debug;

use super::{
    StateCell, ViewState, ADD_PRODUCT_FAILED, DELETE_PRODUCT_FAILED, FETCH_PRODUCTS_FAILED,
    UPDATE_PRODUCT_FAILED,
};
use crate::catalog::CatalogStore;
use crate::errors::StoreError;
use crate::storage::DocumentBackend;

/// Observable product list.
///
/// Created through [`ProductsView::init`], which fetches once on its own.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::catalog::CatalogStore;
/// use service::storage::MemoryBackend;
/// use service::view::ProductsView;
/// use models::NewProduct;
///
/// let store = Arc::new(CatalogStore::new(Arc::new(MemoryBackend::new())));
/// let view = tokio_test::block_on(ProductsView::init(store));
/// assert!(!view.state().loading);
///
/// let input = NewProduct {
///     name: "Ibuprofen 200mg".into(),
///     description: String::new(),
///     price: 3.2,
///     stock: 40,
///     category: None,
///     requires_prescription: false,
///     pharmacy_id: "ph-1".into(),
/// };
/// let id = tokio_test::block_on(view.add_product(input)).unwrap();
/// assert_eq!(view.state().data[0].id, id);
/// ```
pub struct ProductsView<B: DocumentBackend + ?Sized> {
    store: Arc<CatalogStore<B>>,
    state: StateCell<Product>,
}

impl<B: DocumentBackend + ?Sized> ProductsView<B> {
    /// Build the view and run its one automatic fetch.
    ///
    /// A failed initial fetch is recorded in `error`, not returned.
    pub async fn init(store: Arc<CatalogStore<B>>) -> Self {
        let view = Self { store, state: StateCell::new(ViewState::new(true)) };
        view.refetch().await;
        view
    }

    pub fn state(&self) -> ViewState<Product> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Product>> {
        self.state.subscribe()
    }

    /// Reload every product, newest first.
    pub async fn refetch(&self) {
        self.state.fetch(self.store.get_products(), FETCH_PRODUCTS_FAILED).await;
    }

    /// Persist a product and prepend it locally; returns the new id.
    pub async fn add_product(&self, product: NewProduct) -> Result<String, StoreError> {
        let id = self
            .store
            .add_product(&product)
            .await
            .map_err(|e| self.state.fail(ADD_PRODUCT_FAILED, e))?;
        let record = product.into_product(id.clone());
        self.state.modify(|s| s.data.insert(0, record));
        debug!(product_id = %id, "product prepended to local state");
        Ok(id)
    }

    /// Persist a partial update and merge it into the local record.
    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<(), StoreError> {
        self.store
            .update_product(id, &patch)
            .await
            .map_err(|e| self.state.fail(UPDATE_PRODUCT_FAILED, e))?;
        self.state.modify(|s| {
            if let Some(product) = s.data.iter_mut().find(|p| p.id == id) {
                patch.apply_to(product);
            }
        });
        Ok(())
    }

    /// Delete a product and drop it from the local list.
    pub async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        self.store
            .delete_product(id)
            .await
            .map_err(|e| self.state.fail(DELETE_PRODUCT_FAILED, e))?;
        self.state.modify(|s| s.data.retain(|p| p.id != id));
        Ok(())
    }
}
