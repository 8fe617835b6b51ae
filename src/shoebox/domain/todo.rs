use super::{Domain, Toggle};
use crate::error::{Result, ShoeboxError};
use crate::model::Record;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const DEFAULT_CATEGORY: &str = "Personal";
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// The to-dos domain.
#[derive(Debug, Clone, Copy)]
pub struct Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    pub completed: bool,
}

/// Raw to-do form values. The due date arrives as the string typed into the
/// date field, empty for "no due date".
#[derive(Debug, Clone, PartialEq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub category: String,
    pub priority: Priority,
}

impl Default for TodoDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            priority: Priority::default(),
        }
    }
}

/// View-level status classification. Date-based variants are evaluated
/// against the query instant, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoStatus {
    Pending,
    Completed,
    /// Due on the current calendar day. A task keeps this (non-overdue)
    /// classification until its day ends.
    DueToday,
    /// Due within the next seven days, inclusive on both ends.
    DueThisWeek,
    /// Incomplete with a due date strictly in the past.
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoSort {
    /// Newest first.
    Newest,
    Oldest,
    /// Soonest due date first; records without a due date sort last.
    DueAsc,
    /// Latest due date first; records without a due date sort first.
    DueDesc,
    /// High before medium before low.
    PriorityDesc,
}

impl Default for TodoSort {
    fn default() -> Self {
        Self::Newest
    }
}

impl Domain for Todo {
    type Fields = TodoFields;
    type Draft = TodoDraft;
    type StatusFilter = TodoStatus;
    type SortKey = TodoSort;

    const KEY: &'static str = "todos";

    fn validate(draft: &TodoDraft) -> Result<TodoFields> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ShoeboxError::Validation("to-do title is required".into()));
        }

        let due = draft.due_date.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(due, DUE_DATE_FORMAT).map_err(|_| {
                    ShoeboxError::Validation("to-do due date must be a YYYY-MM-DD date".into())
                })?,
            )
        };

        Ok(TodoFields {
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            due_date,
            category: draft.category.clone(),
            priority: draft.priority,
            completed: false,
        })
    }

    fn draft(fields: &TodoFields) -> TodoDraft {
        TodoDraft {
            title: fields.title.clone(),
            description: fields.description.clone(),
            due_date: fields
                .due_date
                .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            category: fields.category.clone(),
            priority: fields.priority,
        }
    }

    fn carry_over(new: &mut TodoFields, old: &TodoFields) {
        new.completed = old.completed;
    }

    fn matches_search(fields: &TodoFields, needle: &str) -> bool {
        fields.title.to_lowercase().contains(needle)
    }

    fn category(fields: &TodoFields) -> &str {
        &fields.category
    }

    fn matches_status(record: &Record<TodoFields>, filter: TodoStatus, now: DateTime<Utc>) -> bool {
        let t = &record.fields;
        let today = now.date_naive();
        match filter {
            TodoStatus::Pending => !t.completed,
            TodoStatus::Completed => t.completed,
            TodoStatus::DueToday => t.due_date == Some(today),
            TodoStatus::DueThisWeek => t
                .due_date
                .is_some_and(|due| due >= today && due <= today + Duration::days(7)),
            TodoStatus::Overdue => !t.completed && t.due_date.is_some_and(|due| due < today),
        }
    }

    fn compare(a: &Record<TodoFields>, b: &Record<TodoFields>, key: TodoSort) -> Ordering {
        match key {
            TodoSort::Newest => b.created_at.cmp(&a.created_at),
            TodoSort::Oldest => a.created_at.cmp(&b.created_at),
            TodoSort::DueAsc => match (a.fields.due_date, b.fields.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            TodoSort::DueDesc => match (a.fields.due_date, b.fields.due_date) {
                (Some(x), Some(y)) => y.cmp(&x),
                // A missing due date is always "latest", so it leads the
                // descending order.
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            },
            TodoSort::PriorityDesc => b.fields.priority.cmp(&a.fields.priority),
        }
    }
}

impl Toggle for Todo {
    fn flip(fields: &mut TodoFields) -> bool {
        fields.completed = !fields.completed;
        fields.completed
    }
}
