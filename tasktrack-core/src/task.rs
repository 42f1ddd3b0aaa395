//! Task records and the form drafts they are built from.
//!
//! A [`Task`] is the only persisted entity. It is serialized with camelCase
//! field names so a stored task list reads as a plain JSON array of records:
//!
//! ```json
//! [{"id":1718000000000,"title":"Buy milk","description":"","priority":"Low",
//!   "tags":["home"],"completed":false,
//!   "createdAt":"2024-06-10T06:13:20Z","updatedAt":"2024-06-10T06:13:20Z"}]
//! ```
//!
//! Records are never built from loose fields by callers: user input arrives
//! as a [`TaskDraft`] and is normalized by [`TaskDraft::validate`].

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Format accepted for due dates, both in drafts and in stored records.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier of a task within one user's collection.
///
/// Derived from the creation instant in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Creates the id a task created at `instant` would get.
    #[must_use]
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp_millis())
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (the default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The next priority, wrapping from `High` to `Low`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// The previous priority, wrapping from `Low` to `High`.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the owning collection; never reused.
    pub id: TaskId,
    /// Trimmed, never empty.
    pub title: String,
    /// Free text, possibly empty.
    #[serde(default)]
    pub description: String,
    /// Priority, `Medium` when missing from stored data.
    #[serde(default)]
    pub priority: Priority,
    /// Optional calendar due date.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_due_date"
    )]
    pub due_date: Option<NaiveDate>,
    /// Tags in input order, none of them empty.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// Creation instant; never changes.
    pub created_at: DateTime<Utc>,
    /// Last mutation instant, including completion toggles.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a fresh, incomplete task from validated input.
    #[must_use]
    pub fn from_valid(id: TaskId, valid: ValidTask, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: valid.title,
            description: valid.description,
            priority: valid.priority,
            due_date: valid.due_date,
            tags: valid.tags,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields with validated input.
    ///
    /// `id`, `created_at`, `completed` and `updated_at` are left to the caller.
    pub fn apply(&mut self, valid: ValidTask) {
        self.title = valid.title;
        self.description = valid.description;
        self.priority = valid.priority;
        self.due_date = valid.due_date;
        self.tags = valid.tags;
    }
}

/// Stored records written by older front ends use `""` for "no due date".
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DUE_DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Errors produced when validating a [`TaskDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("Title is required")]
    TitleEmpty,
    /// The due date is not a `YYYY-MM-DD` calendar date.
    #[error("Due date must be YYYY-MM-DD, got '{0}'")]
    InvalidDueDate(String),
}

/// Raw create/edit form input.
///
/// Every field is kept exactly as typed; [`validate`](Self::validate) does the
/// trimming and parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Selected priority.
    pub priority: Priority,
    /// Due date text, empty for none.
    pub due_date: String,
    /// Comma-separated tags.
    pub tags: String,
}

impl TaskDraft {
    /// Creates a draft with only a title set.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Pre-fills a draft from an existing task, for the edit form.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task
                .due_date
                .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            tags: task.tags.join(", "),
        }
    }

    /// Normalizes the draft into record fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TitleEmpty`] for a blank title and
    /// [`ValidationError::InvalidDueDate`] for an unparsable due date.
    pub fn validate(&self) -> Result<ValidTask, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::TitleEmpty);
        }

        let due_text = self.due_date.trim();
        let due_date = if due_text.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(due_text, DUE_DATE_FORMAT)
                    .map_err(|_| ValidationError::InvalidDueDate(due_text.to_string()))?,
            )
        };

        Ok(ValidTask {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority,
            due_date,
            tags: parse_tags(&self.tags),
        })
    }
}

/// Editable task fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTask {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Parsed due date.
    pub due_date: Option<NaiveDate>,
    /// Parsed tags.
    pub tags: Vec<String>,
}

/// Splits comma-separated tag input, trimming each entry and dropping blanks.
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
