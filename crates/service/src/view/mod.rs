//! View-state adapter: store access wrapped in observable `data`/`loading`/
//! `error` state for a presentation layer.
//!
//! State is owned by the view object, never global. Each change is applied
//! as one `watch` update, so subscribers always see a consistent snapshot and
//! concurrent operations resolve as last-completion-wins.
//!
//! Writes update the local copy optimistically instead of refetching: the
//! local list reflects what this process wrote, not necessarily what the
//! backend now holds (other writers, backend-side defaults and timestamps
//! only show up on the next fetch).

mod pharmacies;
mod products;

use std::future::Future;

use tokio::sync::watch;
use tracing::error;

use crate::errors::StoreError;

pub use pharmacies::PharmaciesView;
pub use products::ProductsView;

pub const FETCH_PRODUCTS_FAILED: &str = "Failed to fetch products";
pub const ADD_PRODUCT_FAILED: &str = "Failed to add product";
pub const UPDATE_PRODUCT_FAILED: &str = "Failed to update product";
pub const DELETE_PRODUCT_FAILED: &str = "Failed to delete product";
pub const FETCH_PHARMACIES_FAILED: &str = "Failed to fetch pharmacies";
pub const GET_PHARMACY_FAILED: &str = "Failed to get pharmacy";
pub const ADD_PHARMACY_FAILED: &str = "Failed to add pharmacy";

/// Snapshot of one entity family as seen by the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState<T> {
    /// Last known records.
    pub data: Vec<T>,
    /// True strictly while a fetch is in flight.
    pub loading: bool,
    /// Last failure message; cleared by the next successful fetch.
    pub error: Option<String>,
}

impl<T> ViewState<T> {
    fn new(loading: bool) -> Self {
        Self { data: Vec::new(), loading, error: None }
    }
}

/// Observable state cell backed by a `watch` channel.
struct StateCell<T> {
    tx: watch::Sender<ViewState<T>>,
}

impl<T: Clone> StateCell<T> {
    fn new(initial: ViewState<T>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    fn snapshot(&self) -> ViewState<T> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.tx.subscribe()
    }

    fn modify(&self, f: impl FnOnce(&mut ViewState<T>)) {
        self.tx.send_modify(f);
    }

    /// Record a failed operation and hand the error back to the caller.
    fn fail(&self, message: &str, err: StoreError) -> StoreError {
        self.modify(|s| s.error = Some(message.to_string()));
        err
    }

    /// Run a read: `loading` on, replace `data` and clear `error` on success,
    /// keep `data` and set `message` on failure, `loading` off either way.
    async fn fetch<F>(&self, read: F, message: &str)
    where
        F: Future<Output = Result<Vec<T>, StoreError>>,
    {
        self.modify(|s| s.loading = true);
        match read.await {
            Ok(data) => self.modify(|s| {
                s.data = data;
                s.error = None;
                s.loading = false;
            }),
            Err(err) => {
                error!(error = %err, "{message}");
                self.modify(|s| {
                    s.error = Some(message.to_string());
                    s.loading = false;
                });
            }
        }
    }
}
