//! In-process collection state shared by the bundled backends.
//!
//! Documents keep insertion order inside each collection so unordered
//! queries and ordering ties are deterministic.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use models::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{Direction, Query, StoredDocument};
use crate::errors::StoreError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Collections(BTreeMap<String, Vec<StoredDocument>>);

impl Collections {
    pub(crate) fn insert(&mut self, collection: &str, doc: Document) -> Result<String, StoreError> {
        check_name(collection)?;
        let id = Uuid::new_v4().simple().to_string();
        self.0
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id: id.clone(), data: doc });
        Ok(id)
    }

    pub(crate) fn query(&self, collection: &str, query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        check_name(collection)?;
        for (field, _) in &query.filters {
            check_field(field)?;
        }
        if let Some(order) = &query.order_by {
            check_field(&order.field)?;
        }
        let Some(docs) = self.0.get(collection) else {
            return Ok(Vec::new());
        };

        let mut hits: Vec<StoredDocument> = docs
            .iter()
            .filter(|d| query.filters.iter().all(|(field, value)| d.data.get(field) == Some(value)))
            .cloned()
            .collect();

        if let Some(order) = &query.order_by {
            // Ordered queries only see documents that carry the ordering field.
            hits.retain(|d| d.data.contains_key(&order.field));
            let key = |d: &StoredDocument| d.data.get(&order.field).cloned().unwrap_or(Value::Null);
            match order.direction {
                Direction::Ascending => hits.sort_by(|a, b| compare_values(&key(a), &key(b))),
                Direction::Descending => hits.sort_by(|a, b| compare_values(&key(b), &key(a))),
            }
        }
        Ok(hits)
    }

    pub(crate) fn update(&mut self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        check_name(collection)?;
        let doc = self
            .0
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        doc.data.extend(fields);
        Ok(())
    }

    pub(crate) fn delete(&mut self, collection: &str, id: &str) -> Result<(), StoreError> {
        check_name(collection)?;
        if let Some(docs) = self.0.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}

fn check_name(collection: &str) -> Result<(), StoreError> {
    if collection.trim().is_empty() {
        return Err(StoreError::InvalidQuery("collection name is empty".into()));
    }
    Ok(())
}

fn check_field(field: &str) -> Result<(), StoreError> {
    if field.trim().is_empty() {
        return Err(StoreError::InvalidQuery("field path is empty".into()));
    }
    Ok(())
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values: by type first, then numbers numerically and
/// strings lexically. Arrays and objects compare equal among themselves.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
