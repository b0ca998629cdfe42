//! Conversions between typed records and schema-less documents.
//!
//! Documents are flat JSON objects with camelCase keys. The backend key is
//! never stored inside the body; it is injected as `id` when a document is
//! decoded into a record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// Schema-less document body as stored by a document backend.
pub type Document = Map<String, Value>;

pub const FIELD_ID: &str = "id";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Serialize a record input into a document body.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, ModelError> {
    match serde_json::to_value(value).map_err(|e| ModelError::Encode(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::Encode(format!("expected an object, got {other}"))),
    }
}

/// Decode a stored document into a record, threading the backend id in.
pub fn from_document<T: DeserializeOwned>(id: &str, mut doc: Document) -> Result<T, ModelError> {
    doc.insert(FIELD_ID.to_string(), Value::String(id.to_string()));
    serde_json::from_value(Value::Object(doc)).map_err(|e| ModelError::Decode {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

/// Timestamp as stored in documents: RFC 3339, UTC, fixed nanosecond width,
/// so lexical order of the strings equals chronological order.
pub fn timestamp_value(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Nanos, true))
}
