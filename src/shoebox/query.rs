//! The query engine: derives a filtered, sorted view of a collection from
//! transient view parameters, without mutating the underlying store.

use crate::domain::Domain;
use crate::model::Record;
use chrono::{DateTime, Utc};

/// Category predicate: everything, or an exact category match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::All
    }
}

/// Transient view parameters controlling the derived output. Never
/// persisted.
pub struct ViewQuery<D: Domain> {
    /// Case-insensitive substring match over the domain's searchable
    /// fields; empty means no search.
    pub search: String,
    pub category: CategoryFilter,
    pub status: Option<D::StatusFilter>,
    pub sort: D::SortKey,
}

impl<D: Domain> Default for ViewQuery<D> {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::default(),
            status: None,
            sort: D::SortKey::default(),
        }
    }
}

impl<D: Domain> Clone for ViewQuery<D> {
    fn clone(&self) -> Self {
        Self {
            search: self.search.clone(),
            category: self.category.clone(),
            status: self.status,
            sort: self.sort,
        }
    }
}

impl<D: Domain> ViewQuery<D> {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::Only(category.into());
        self
    }

    pub fn with_status(mut self, status: D::StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_sort(mut self, sort: D::SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// Derive the visible slice of a collection snapshot.
///
/// Pure function of (snapshot, parameters, instant): filters first (search
/// AND category AND status), then applies the single chosen comparator with
/// a stable sort, then the domain's fixed reorder pass (pinned notes
/// first). `now` anchors date-based status classification and is explicit
/// so scheduled recomputations and tests control it.
pub fn run<D: Domain>(
    records: &[Record<D::Fields>],
    query: &ViewQuery<D>,
    now: DateTime<Utc>,
) -> Vec<Record<D::Fields>> {
    let needle = query.search.trim().to_lowercase();

    let mut view: Vec<Record<D::Fields>> = records
        .iter()
        .filter(|r| needle.is_empty() || D::matches_search(&r.fields, &needle))
        .filter(|r| query.category.matches(D::category(&r.fields)))
        .filter(|r| match query.status {
            Some(status) => D::matches_status(r, status, now),
            None => true,
        })
        .cloned()
        .collect();

    // sort_by is stable, so records with equal keys keep their insertion
    // (newest-first) order.
    view.sort_by(|a, b| D::compare(a, b, query.sort));
    D::reorder(&mut view);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, NoteDraft, NoteSort, Todo, TodoDraft, TodoStatus};
    use crate::store::fixtures::StoreFixture;

    fn note(title: &str, category: &str) -> NoteDraft {
        NoteDraft {
            title: title.into(),
            content: format!("{} body", title),
            category: category.into(),
            ..NoteDraft::default()
        }
    }

    fn titles(view: &[crate::model::Record<crate::domain::NoteFields>]) -> Vec<&str> {
        view.iter().map(|r| r.fields.title.as_str()).collect()
    }

    #[test]
    fn default_query_returns_everything_newest_first() {
        let fx = StoreFixture::new().with_notes(3);
        let view = run(fx.notes.list(), &ViewQuery::<Note>::default(), Utc::now());
        assert_eq!(titles(&view), vec!["Test Note 3", "Test Note 2", "Test Note 1"]);
    }

    #[test]
    fn search_and_category_and_status_must_all_pass() {
        let mut fx = StoreFixture::new();
        fx.notes.create(&note("Rust homework", "Study")).unwrap();
        fx.notes.create(&note("Rust shopping", "Personal")).unwrap();
        fx.notes.create(&note("Garden plan", "Personal")).unwrap();

        let query = ViewQuery::<Note>::default()
            .with_search("rust")
            .with_category("Personal");
        let view = run(fx.notes.list(), &query, Utc::now());
        assert_eq!(titles(&view), vec!["Rust shopping"]);
    }

    #[test]
    fn filter_order_is_immaterial() {
        let mut fx = StoreFixture::new();
        fx.notes.create(&note("Rust homework", "Study")).unwrap();
        fx.notes.create(&note("Rust shopping", "Personal")).unwrap();
        fx.notes.create(&note("Garden plan", "Personal")).unwrap();
        let now = Utc::now();

        // search-then-category...
        let first = run(
            fx.notes.list(),
            &ViewQuery::<Note>::default().with_search("rust"),
            now,
        );
        let first = run(&first, &ViewQuery::<Note>::default().with_category("Personal"), now);

        // ...equals category-then-search.
        let second = run(
            fx.notes.list(),
            &ViewQuery::<Note>::default().with_category("Personal"),
            now,
        );
        let second = run(&second, &ViewQuery::<Note>::default().with_search("rust"), now);

        assert_eq!(first, second);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut fx = StoreFixture::new();
        fx.notes.create(&note("Same title", "Study")).unwrap();
        fx.notes.create(&note("Same title", "Personal")).unwrap();
        fx.notes.create(&note("Same title", "Work")).unwrap();

        let query = ViewQuery::<Note>::default().with_sort(NoteSort::Title);
        let view = run(fx.notes.list(), &query, Utc::now());

        // All keys equal: insertion (newest-first) order is preserved.
        let categories: Vec<_> = view.iter().map(|r| r.fields.category.as_str()).collect();
        assert_eq!(categories, vec!["Work", "Personal", "Study"]);
    }

    #[test]
    fn pinned_notes_lead_regardless_of_sort_key() {
        let mut fx = StoreFixture::new();
        let a = fx.notes.create(&note("Alpha", "Study")).unwrap();
        fx.notes.create(&note("Beta", "Study")).unwrap();
        let z = fx.notes.create(&note("Zulu", "Study")).unwrap();
        fx.notes.toggle(a.id).unwrap();
        fx.notes.toggle(z.id).unwrap();

        let query = ViewQuery::<Note>::default().with_sort(NoteSort::Title);
        let view = run(fx.notes.list(), &query, Utc::now());

        // Pinned group first, each group keeping the title sort.
        assert_eq!(titles(&view), vec!["Alpha", "Zulu", "Beta"]);
        assert!(view[0].fields.pinned && view[1].fields.pinned);
        assert!(!view[2].fields.pinned);
    }

    #[test]
    fn status_filter_reclassifies_with_the_instant() {
        use chrono::TimeZone;

        let mut fx = StoreFixture::new();
        fx.todos
            .create(&TodoDraft {
                title: "Report".into(),
                due_date: "2024-01-03".into(),
                ..TodoDraft::default()
            })
            .unwrap();

        let query = ViewQuery::<Todo>::default().with_status(TodoStatus::Overdue);

        // Not overdue on its due day...
        let on_the_day = Utc.with_ymd_and_hms(2024, 1, 3, 23, 0, 0).unwrap();
        assert!(run(fx.todos.list(), &query, on_the_day).is_empty());

        // ...overdue once the day has passed. Same data, later instant.
        let next_day = Utc.with_ymd_and_hms(2024, 1, 4, 0, 30, 0).unwrap();
        assert_eq!(run(fx.todos.list(), &query, next_day).len(), 1);
    }

    #[test]
    fn query_does_not_mutate_the_store() {
        let fx = StoreFixture::new().with_notes(2);
        let before: Vec<_> = fx.notes.list().to_vec();
        let _ = run(
            fx.notes.list(),
            &ViewQuery::<Note>::default().with_sort(NoteSort::Title),
            Utc::now(),
        );
        assert_eq!(fx.notes.list(), &before[..]);
    }
}
