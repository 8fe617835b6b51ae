//! Domain descriptors for the three record collections.
//!
//! The record store, query engine and edit session are written once against
//! the [`Domain`] trait and instantiated per collection. A descriptor
//! bundles everything that actually differs between notes, products and
//! to-dos: validation of raw form input, draft hydration for edit mode,
//! searchable fields, the category accessor, status predicates, sort
//! comparators and the optional post-sort reorder pass.

use crate::error::Result;
use crate::model::Record;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;

pub mod note;
pub mod product;
pub mod todo;

pub use note::{Note, NoteDraft, NoteFields, NoteSort};
pub use product::{Product, ProductDraft, ProductFields, ProductSort, PLACEHOLDER_IMAGE};
pub use todo::{Priority, Todo, TodoDraft, TodoFields, TodoSort, TodoStatus};

/// Status filter for domains without a status dimension.
///
/// Uninhabited, so a view query over these domains can never carry a status
/// predicate in the first place.
#[derive(Debug, Clone, Copy)]
pub enum NoStatus {}

/// Descriptor for one record domain.
pub trait Domain {
    /// Validated domain fields carried by every record.
    type Fields: Clone + Serialize + DeserializeOwned;
    /// Raw form values, exactly as the view renderer submits them.
    type Draft: Clone + Default;
    /// Domain-specific status predicate for view filtering.
    type StatusFilter: Copy;
    /// Domain-specific sort keys.
    type SortKey: Copy + Default;

    /// Key the collection blob is stored under.
    const KEY: &'static str;

    /// Validate raw form input, producing well-formed fields with domain
    /// defaults applied. Fails with a `Validation` error naming the
    /// offending field.
    fn validate(draft: &Self::Draft) -> Result<Self::Fields>;

    /// Hydrate a form draft back from stored fields (edit mode).
    fn draft(fields: &Self::Fields) -> Self::Draft;

    /// Carry non-form state (toggle flags) from the previously stored fields
    /// into a validated replacement. The shared form never carries these, so
    /// an update must not reset them. Default: plain replacement.
    fn carry_over(_new: &mut Self::Fields, _old: &Self::Fields) {}

    /// Case-insensitive substring match over the domain's searchable fields.
    /// `needle` is non-empty and already lowercased.
    fn matches_search(fields: &Self::Fields, needle: &str) -> bool;

    /// Category used for exact-match filtering.
    fn category(fields: &Self::Fields) -> &str;

    /// Evaluate a status predicate against the given instant.
    fn matches_status(
        record: &Record<Self::Fields>,
        filter: Self::StatusFilter,
        now: DateTime<Utc>,
    ) -> bool;

    /// Comparator for the chosen sort key. The caller sorts stably, so equal
    /// keys keep their insertion order.
    fn compare(a: &Record<Self::Fields>, b: &Record<Self::Fields>, key: Self::SortKey) -> Ordering;

    /// Fixed reorder pass applied after the primary sort. Default: none.
    fn reorder(_records: &mut Vec<Record<Self::Fields>>) {}
}

/// Domains with a single toggleable boolean flag (note pinning, to-do
/// completion). Flipping the flag is not an edit: it leaves `updated_at`
/// untouched.
pub trait Toggle: Domain {
    /// Flip the flag, returning the new value.
    fn flip(fields: &mut Self::Fields) -> bool;
}
