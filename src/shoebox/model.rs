use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a record within its collection.
///
/// Ids are creation instants in milliseconds, which makes them unique,
/// immutable and monotonic by creation order. Same-millisecond creations are
/// disambiguated by the id generator in the record store; ids are never
/// reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entity instance in a domain collection.
///
/// The envelope carries identity and timestamps; the domain fields are
/// flattened next to them on the wire, so a persisted record is a single
/// flat JSON object with camelCase keys (`createdAt`, `updatedAt`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<F> {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: F,
}

impl<F> Record<F> {
    pub fn new(id: RecordId, created_at: DateTime<Utc>, fields: F) -> Self {
        Self {
            id,
            created_at,
            updated_at: created_at,
            fields,
        }
    }
}
