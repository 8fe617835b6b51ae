use super::{load_collection, save_collection, BlobStore};
use crate::domain::{Domain, Toggle};
use crate::error::{Result, ShoeboxError};
use crate::model::{Record, RecordId};
use chrono::{DateTime, Utc};
use log::warn;
use std::rc::Rc;

/// Generator for creation-ordered record ids.
///
/// Ids are the creation instant in milliseconds; a creation landing in an
/// already-used millisecond bumps past the previous id, so ids stay unique
/// and strictly monotonic within a collection.
struct IdGen {
    last: i64,
}

impl IdGen {
    fn seeded(last: i64) -> Self {
        Self { last }
    }

    fn next(&mut self, now: DateTime<Utc>) -> RecordId {
        self.last = now.timestamp_millis().max(self.last + 1);
        RecordId::from_millis(self.last)
    }
}

/// One domain collection: the in-memory record list plus its persistence
/// contract.
///
/// The collection is owned and encapsulated; the documented operations are
/// the only mutation path. Every successful mutation flushes the full
/// collection to the blob store before returning, so the in-memory and
/// persisted states never diverge observably. When a flush fails the
/// mutation stays applied in memory and the error surfaces to the caller
/// (degraded memory-only mode): the user's edit is never silently dropped.
pub struct RecordStore<D: Domain, B: BlobStore> {
    backend: Rc<B>,
    records: Vec<Record<D::Fields>>,
    ids: IdGen,
}

impl<D: Domain, B: BlobStore> RecordStore<D, B> {
    /// Open the collection, rehydrating from the blob stored under
    /// [`Domain::KEY`]. A missing blob is an empty collection.
    pub fn open(backend: Rc<B>) -> Result<Self> {
        let records: Vec<Record<D::Fields>> = load_collection(&*backend, D::KEY)?;
        let last = records.iter().map(|r| r.id.as_millis()).max().unwrap_or(0);
        Ok(Self {
            backend,
            records,
            ids: IdGen::seeded(last),
        })
    }

    /// Full collection in insertion order, newest first.
    pub fn list(&self) -> &[Record<D::Fields>] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record<D::Fields>> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate `draft` and prepend a new record with a fresh id and
    /// matching creation/update timestamps. A validation failure leaves the
    /// collection unchanged.
    pub fn create(&mut self, draft: &D::Draft) -> Result<Record<D::Fields>> {
        let fields = D::validate(draft)?;
        let now = Utc::now();
        let record = Record::new(self.ids.next(now), now, fields);
        self.records.insert(0, record.clone());
        self.flush()?;
        Ok(record)
    }

    /// Replace the domain fields of `id` with re-validated form input,
    /// preserving `id`/`created_at` (and toggle flags, which the form never
    /// carries) and refreshing `updated_at`.
    pub fn update(&mut self, id: RecordId, draft: &D::Draft) -> Result<Record<D::Fields>> {
        let mut fields = D::validate(draft)?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ShoeboxError::NotFound(id))?;
        D::carry_over(&mut fields, &record.fields);
        record.fields = fields;
        record.updated_at = Utc::now();
        let updated = record.clone();
        self.flush()?;
        Ok(updated)
    }

    /// Remove `id`. Silently a no-op when the id is absent: the renderer has
    /// already confirmed the deletion, and a repeated request must not fail.
    pub fn remove(&mut self, id: RecordId) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Ok(());
        }
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        save_collection(&*self.backend, D::KEY, &self.records).map_err(|e| {
            warn!("flush of `{}` failed: {}", D::KEY, e);
            e
        })
    }
}

impl<D: Toggle, B: BlobStore> RecordStore<D, B> {
    /// Flip the domain's toggle flag (pinned / completed), returning the new
    /// value. Leaves `updated_at` untouched: pinning and completing are not
    /// edits.
    pub fn toggle(&mut self, id: RecordId) -> Result<bool> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ShoeboxError::NotFound(id))?;
        let value = D::flip(&mut record.fields);
        self.flush()?;
        Ok(value)
    }
}
