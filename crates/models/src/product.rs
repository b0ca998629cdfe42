use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product record as returned to callers.
///
/// Timestamps are `None` for records assembled locally after an optimistic
/// insert, until the next fetch brings back the stored values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub requires_prescription: bool,
    pub pharmacy_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product fields supplied on creation; the id comes from the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub requires_prescription: bool,
    pub pharmacy_id: String,
}

impl NewProduct {
    /// Assemble the caller-facing record from input fields and the id the
    /// backend assigned.
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            requires_prescription: self.requires_prescription,
            pharmacy_id: self.pharmacy_id,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Partial product update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_prescription: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacy_id: Option<String>,
}

impl ProductPatch {
    /// Merge the set fields into a local record.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name { product.name = name.clone(); }
        if let Some(description) = &self.description { product.description = description.clone(); }
        if let Some(price) = self.price { product.price = price; }
        if let Some(stock) = self.stock { product.stock = stock; }
        if let Some(category) = &self.category { product.category = Some(category.clone()); }
        if let Some(flag) = self.requires_prescription { product.requires_prescription = flag; }
        if let Some(pharmacy_id) = &self.pharmacy_id { product.pharmacy_id = pharmacy_id.clone(); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{from_document, to_document};

    fn aspirin() -> NewProduct {
        NewProduct {
            name: "Aspirin 100mg".into(),
            description: "30 tablets".into(),
            price: 4.5,
            stock: 12,
            category: None,
            requires_prescription: false,
            pharmacy_id: "ph-1".into(),
        }
    }

    #[test]
    fn new_product_encodes_camel_case_fields() {
        let doc = to_document(&aspirin()).unwrap();
        assert_eq!(doc.get("pharmacyId").and_then(|v| v.as_str()), Some("ph-1"));
        assert_eq!(doc.get("requiresPrescription").and_then(|v| v.as_bool()), Some(false));
        assert!(!doc.contains_key("category"));
        assert!(!doc.contains_key("id"));
    }

    #[test]
    fn decoding_threads_the_backend_id() {
        let doc = to_document(&aspirin()).unwrap();
        let product: Product = from_document("abc", doc).unwrap();
        assert_eq!(product.id, "abc");
        assert_eq!(product.created_at, None);
        assert_eq!(product, aspirin().into_product("abc".into()));
    }

    #[test]
    fn decoding_fails_without_required_fields() {
        let mut doc = to_document(&aspirin()).unwrap();
        doc.remove("price");
        let err = from_document::<Product>("abc", doc).unwrap_err();
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn patch_only_serializes_set_fields() {
        let patch = ProductPatch { price: Some(5.0), ..Default::default() };
        let doc = to_document(&patch).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(to_document(&ProductPatch::default()).unwrap().is_empty());
    }

    #[test]
    fn patch_merges_into_local_record() {
        let mut product = aspirin().into_product("abc".into());
        ProductPatch { stock: Some(0), category: Some("analgesic".into()), ..Default::default() }
            .apply_to(&mut product);
        assert_eq!(product.stock, 0);
        assert_eq!(product.category.as_deref(), Some("analgesic"));
        assert_eq!(product.name, "Aspirin 100mg");
    }
}
