//! Typed records of the content service.
//!
//! Records arrive as JSON objects carrying the service's system fields
//! (`id`, `collectionId`, `collectionName`) next to the collection's own
//! fields. Every record type flattens [`RecordMeta`] so it can be decoded
//! straight from what the service returns.

pub mod stage;
pub mod portfolio;
pub mod people;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub use stage::Stage;
pub use portfolio::{PortfolioCompany, PortfolioExpand, STAGE_DIMENSION, STATUS_DIMENSION};
pub use people::{Fund, Manager, TeamMember};

/// Collections the site reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Funds, each run by a manager.
    Funds,
    /// Fund managers.
    Managers,
    /// Portfolio companies.
    PortfolioCompanies,
    /// Team members.
    Team,
}

impl Collection {
    /// Every collection.
    pub const ALL: [Collection; 4] = [
        Self::Funds,
        Self::Managers,
        Self::PortfolioCompanies,
        Self::Team,
    ];

    /// Collection name as used by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Funds => "funds",
            Self::Managers => "managers",
            Self::PortfolioCompanies => "portfolio_companies",
            Self::Team => "team",
        }
    }

    /// Parse a collection name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Target collection of a relation field, if `field` is one.
    pub fn relation(&self, field: &str) -> Option<Collection> {
        match (self, field) {
            (Self::PortfolioCompanies, "funds") => Some(Self::Funds),
            (Self::Funds, "manager") => Some(Self::Managers),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// System fields present on every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    /// Record ID.
    pub id: String,
    /// ID of the owning collection (used in file URLs).
    #[serde(default)]
    pub collection_id: String,
    /// Name of the owning collection.
    #[serde(default)]
    pub collection_name: String,
}

impl RecordMeta {
    /// Create record metadata.
    pub fn new(
        id: impl Into<String>,
        collection_id: impl Into<String>,
        collection: Collection,
    ) -> Self {
        Self {
            id: id.into(),
            collection_id: collection_id.into(),
            collection_name: collection.as_str().to_string(),
        }
    }
}

/// Error type for record decoding.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A record did not match the expected shape.
    #[error("Record {index} could not be decoded: {source}")]
    Decode {
        /// Position of the record in the list.
        index: usize,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// Decode raw records into a typed list, preserving order.
pub fn decode_records<T: DeserializeOwned>(records: Vec<Value>) -> Result<Vec<T>, RecordError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|source| RecordError::Decode { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_names() {
        for c in Collection::ALL {
            assert_eq!(Collection::from_name(c.as_str()), Some(c));
        }
        assert_eq!(Collection::from_name("_superusers"), None);
        assert_eq!(
            serde_json::to_string(&Collection::PortfolioCompanies).unwrap(),
            "\"portfolio_companies\""
        );
    }

    #[test]
    fn test_relations() {
        assert_eq!(Collection::PortfolioCompanies.relation("funds"), Some(Collection::Funds));
        assert_eq!(Collection::Funds.relation("manager"), Some(Collection::Managers));
        assert_eq!(Collection::Team.relation("funds"), None);
    }

    #[test]
    fn test_decode_reports_index() {
        let records = vec![
            json!({"id": "a", "name": "Alpha", "title": "Partner"}),
            json!({"id": 7}),
        ];

        let err = decode_records::<TeamMember>(records).unwrap_err();
        assert!(matches!(err, RecordError::Decode { index: 1, .. }));
    }
}
