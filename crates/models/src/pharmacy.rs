use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pharmacy record as returned to callers.
///
/// `email` is unique by convention only; nothing here enforces it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Pharmacy fields supplied on creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPharmacy {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NewPharmacy {
    pub fn into_pharmacy(self, id: String) -> Pharmacy {
        Pharmacy {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{from_document, to_document};

    #[test]
    fn pharmacy_round_trips_through_a_document() {
        let input = NewPharmacy {
            name: "Central".into(),
            email: "central@example.com".into(),
            phone: Some("555-0100".into()),
            address: None,
        };
        let doc = to_document(&input).unwrap();
        assert!(!doc.contains_key("address"));
        let pharmacy: Pharmacy = from_document("p1", doc).unwrap();
        assert_eq!(pharmacy, input.into_pharmacy("p1".into()));
    }
}
