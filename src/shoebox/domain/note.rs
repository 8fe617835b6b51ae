use super::{Domain, NoStatus, Toggle};
use crate::error::{Result, ShoeboxError};
use crate::model::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const DEFAULT_CATEGORY: &str = "Study";

/// The notes domain.
#[derive(Debug, Clone, Copy)]
pub struct Note;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFields {
    pub title: String,
    /// Rich-text markup, pre-sanitized by the renderer. Stored and returned
    /// verbatim; the core never inspects it.
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
}

/// Raw note form values.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    /// Comma-separated, as typed into the tags field.
    pub tags: String,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            tags: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSort {
    /// Newest first.
    DateDesc,
    DateAsc,
    /// Case-insensitive alphabetical by title.
    Title,
}

impl Default for NoteSort {
    fn default() -> Self {
        Self::DateDesc
    }
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl Domain for Note {
    type Fields = NoteFields;
    type Draft = NoteDraft;
    type StatusFilter = NoStatus;
    type SortKey = NoteSort;

    const KEY: &'static str = "notes";

    fn validate(draft: &NoteDraft) -> Result<NoteFields> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ShoeboxError::Validation("note title is required".into()));
        }
        let content = draft.content.trim();
        if content.is_empty() {
            return Err(ShoeboxError::Validation("note content is required".into()));
        }
        Ok(NoteFields {
            title: title.to_string(),
            content: content.to_string(),
            category: draft.category.clone(),
            tags: parse_tags(&draft.tags),
            pinned: false,
        })
    }

    fn draft(fields: &NoteFields) -> NoteDraft {
        NoteDraft {
            title: fields.title.clone(),
            content: fields.content.clone(),
            category: fields.category.clone(),
            tags: fields.tags.join(", "),
        }
    }

    fn carry_over(new: &mut NoteFields, old: &NoteFields) {
        new.pinned = old.pinned;
    }

    fn matches_search(fields: &NoteFields, needle: &str) -> bool {
        fields.title.to_lowercase().contains(needle)
            || fields.content.to_lowercase().contains(needle)
            || fields.category.to_lowercase().contains(needle)
            || fields
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    fn category(fields: &NoteFields) -> &str {
        &fields.category
    }

    fn matches_status(
        _record: &Record<NoteFields>,
        filter: NoStatus,
        _now: DateTime<Utc>,
    ) -> bool {
        match filter {}
    }

    fn compare(a: &Record<NoteFields>, b: &Record<NoteFields>, key: NoteSort) -> Ordering {
        match key {
            NoteSort::DateDesc => b.created_at.cmp(&a.created_at),
            NoteSort::DateAsc => a.created_at.cmp(&b.created_at),
            NoteSort::Title => a
                .fields
                .title
                .to_lowercase()
                .cmp(&b.fields.title.to_lowercase()),
        }
    }

    fn reorder(records: &mut Vec<Record<NoteFields>>) {
        // Stable partition: pinned notes first, relative order kept within
        // each group.
        records.sort_by_key(|r| !r.fields.pinned);
    }
}

impl Toggle for Note {
    fn flip(fields: &mut NoteFields) -> bool {
        fields.pinned = !fields.pinned;
        fields.pinned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> NoteDraft {
        NoteDraft {
            title: title.into(),
            content: content.into(),
            ..NoteDraft::default()
        }
    }

    #[test]
    fn validate_requires_title_and_content() {
        let err = Note::validate(&draft("", "body")).unwrap_err();
        assert!(err.to_string().contains("title"));

        let err = Note::validate(&draft("Title", "   ")).unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn validate_applies_defaults_and_parses_tags() {
        let mut d = draft("Groceries", "milk, eggs");
        d.tags = " work ,, rust , ".into();
        let fields = Note::validate(&d).unwrap();
        assert_eq!(fields.tags, vec!["work", "rust"]);
        assert_eq!(fields.category, "Study");
        assert!(!fields.pinned);
    }

    #[test]
    fn draft_hydration_round_trips() {
        let mut d = draft("Title", "Content");
        d.tags = "a, b".into();
        let fields = Note::validate(&d).unwrap();
        assert_eq!(Note::draft(&fields), d);
    }

    #[test]
    fn carry_over_preserves_pinned() {
        let mut old = Note::validate(&draft("Old", "Old")).unwrap();
        old.pinned = true;
        let mut new = Note::validate(&draft("New", "New")).unwrap();
        Note::carry_over(&mut new, &old);
        assert!(new.pinned);
        assert_eq!(new.title, "New");
    }

    #[test]
    fn search_covers_title_content_tags_and_category() {
        let mut d = draft("Shopping list", "Buy <b>milk</b>");
        d.tags = "errands".into();
        d.category = "Personal".into();
        let fields = Note::validate(&d).unwrap();

        assert!(Note::matches_search(&fields, "shopping"));
        assert!(Note::matches_search(&fields, "milk"));
        assert!(Note::matches_search(&fields, "errands"));
        assert!(Note::matches_search(&fields, "personal"));
        assert!(!Note::matches_search(&fields, "unrelated"));
    }

    #[test]
    fn legacy_notes_without_pinned_flag_deserialize() {
        let json = r#"{"title":"Old","content":"Body","category":"Study","tags":["a"]}"#;
        let fields: NoteFields = serde_json::from_str(json).unwrap();
        assert!(!fields.pinned);
    }

    #[test]
    fn toggle_flips_pinned() {
        let mut fields = Note::validate(&draft("T", "C")).unwrap();
        assert!(Note::flip(&mut fields));
        assert!(!Note::flip(&mut fields));
    }
}
