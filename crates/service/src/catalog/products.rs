use models::{NewProduct, Product, ProductPatch, FIELD_CREATED_AT};
use tracing::{error, info, instrument};

use super::{decode_all, CatalogStore, FIELD_PHARMACY_ID};
use crate::errors::StoreError;
use crate::storage::{Direction, DocumentBackend, Query};

impl<B: DocumentBackend + ?Sized> CatalogStore<B> {
    /// Store a new product and return the backend-assigned id.
    #[instrument(skip(self, product), fields(pharmacy_id = %product.pharmacy_id))]
    pub async fn add_product(&self, product: &NewProduct) -> Result<String, StoreError> {
        let result: Result<String, StoreError> = async {
            check_price(Some(product.price))?;
            let doc = self.new_document(product)?;
            self.backend.insert(&self.collections.products, doc).await
        }
        .await;
        match &result {
            Ok(id) => info!(product_id = %id, "product_added"),
            Err(e) => error!(error = %e, "error adding product"),
        }
        result
    }

    /// All products, newest first.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, StoreError> {
        let query = Query::all().order_by(FIELD_CREATED_AT, Direction::Descending);
        self.query_products(&query)
            .await
            .inspect_err(|e| error!(error = %e, "error getting products"))
    }

    /// Products whose `pharmacyId` equals the given value, newest first.
    #[instrument(skip(self))]
    pub async fn get_products_by_pharmacy(&self, pharmacy_id: &str) -> Result<Vec<Product>, StoreError> {
        let query = Query::all()
            .where_eq(FIELD_PHARMACY_ID, pharmacy_id)
            .order_by(FIELD_CREATED_AT, Direction::Descending);
        self.query_products(&query)
            .await
            .inspect_err(|e| error!(error = %e, "error getting products by pharmacy"))
    }

    /// Merge the patch into the stored product and refresh `updatedAt`.
    ///
    /// The id is not checked first; a missing document is reported however
    /// the backend reports it.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<(), StoreError> {
        let result: Result<(), StoreError> = async {
            check_price(patch.price)?;
            let doc = self.patch_document(patch)?;
            self.backend.update(&self.collections.products, id, doc).await
        }
        .await;
        match &result {
            Ok(()) => info!(product_id = %id, "product_updated"),
            Err(e) => error!(error = %e, "error updating product"),
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        let result = self.backend.delete(&self.collections.products, id).await;
        match &result {
            Ok(()) => info!(product_id = %id, "product_deleted"),
            Err(e) => error!(error = %e, "error deleting product"),
        }
        result
    }

    async fn query_products(&self, query: &Query) -> Result<Vec<Product>, StoreError> {
        let docs = self.backend.query(&self.collections.products, query).await?;
        Ok(decode_all(docs))
    }
}

/// Non-finite prices cannot be stored as JSON numbers.
fn check_price(price: Option<f64>) -> Result<(), StoreError> {
    match price {
        Some(p) if !p.is_finite() => Err(StoreError::InvalidQuery(format!("price must be a finite number, got {p}"))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use std::sync::Arc;

    fn product(name: &str, pharmacy_id: &str) -> NewProduct {
        NewProduct {
            name: name.into(),
            description: String::new(),
            price: 1.0,
            stock: 1,
            category: None,
            requires_prescription: false,
            pharmacy_id: pharmacy_id.into(),
        }
    }

    #[tokio::test]
    async fn add_stamps_matching_timestamps() -> Result<(), anyhow::Error> {
        let store = CatalogStore::new(Arc::new(MemoryBackend::new()));
        let id = store.add_product(&product("Gauze", "p1")).await?;
        let products = store.get_products().await?;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, id);
        assert!(products[0].created_at.is_some());
        assert_eq!(products[0].created_at, products[0].updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn filter_by_pharmacy_is_exact_match() -> Result<(), anyhow::Error> {
        let store = CatalogStore::new(Arc::new(MemoryBackend::new()));
        store.add_product(&product("A", "p1")).await?;
        store.add_product(&product("B", "p10")).await?;
        store.add_product(&product("C", "p1")).await?;

        let names: Vec<_> = store
            .get_products_by_pharmacy("p1")
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["C", "A"]);
        Ok(())
    }

    struct FixedClock(chrono::DateTime<chrono::Utc>);

    impl crate::clock::Clock for FixedClock {
        fn now(&self) -> chrono::DateTime<chrono::Utc> {
            self.0
        }
    }

    #[tokio::test]
    async fn timestamps_come_from_the_store_clock() -> Result<(), anyhow::Error> {
        use chrono::TimeZone;
        let at = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let store = CatalogStore::new(Arc::new(MemoryBackend::new())).with_clock(Arc::new(FixedClock(at)));
        store.add_product(&product("Gauze", "p1")).await?;
        let stored = store.get_products().await?.remove(0);
        assert_eq!(stored.created_at, Some(at));
        assert_eq!(stored.updated_at, Some(at));
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_product_reports_not_found() {
        let store = CatalogStore::new(Arc::new(MemoryBackend::new()));
        let err = store
            .update_product("missing", &ProductPatch { price: Some(2.0), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn non_finite_price_is_rejected_before_the_backend() -> Result<(), anyhow::Error> {
        let store = CatalogStore::new(Arc::new(MemoryBackend::new()));
        let mut bad = product("Gauze", "p1");
        bad.price = f64::INFINITY;
        let err = store.add_product(&bad).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidQuery(_)));
        assert!(store.get_products().await?.is_empty());

        let id = store.add_product(&product("Gauze", "p1")).await?;
        for price in [f64::INFINITY, f64::NAN] {
            let err = store
                .update_product(&id, &ProductPatch { price: Some(price), ..Default::default() })
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::InvalidQuery(_)));
        }
        let stored = store.get_products().await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].price, 1.0);
        Ok(())
    }

    #[tokio::test]
    async fn foreign_documents_do_not_hide_valid_products() -> Result<(), anyhow::Error> {
        let backend = Arc::new(MemoryBackend::new());
        let store = CatalogStore::new(backend.clone());
        let id = store.add_product(&product("Gauze", "p1")).await?;

        let serde_json::Value::Object(foreign) = serde_json::json!({
            "name": "No price",
            "pharmacyId": "p1",
            "createdAt": "2024-01-01T00:00:00.000000000Z",
        }) else {
            unreachable!()
        };
        backend.insert("products", foreign).await?;

        let all = store.get_products().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        let owned = store.get_products_by_pharmacy("p1").await?;
        assert_eq!(owned.len(), 1);
        Ok(())
    }
}
