//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its creation draft.
//! - Enforce required-field rules before a draft becomes a record.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `completed` starts `false` and only changes via an explicit toggle.
//! - `title` and `subject` are non-blank on every validated record.

use super::{is_blank, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Task urgency level.
///
/// Serialized lowercase to match the persisted wire shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Canonical task record.
///
/// The due date is kept in the string form it was entered in; callers that
/// need a calendar value use [`Task::due_date_parsed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable ID used for toggle/delete addressing.
    pub id: TaskId,
    pub title: String,
    pub subject: String,
    /// Calendar date in `YYYY-MM-DD` string form.
    pub due_date: String,
    pub priority: Priority,
    pub completed: bool,
    /// Optional free text; omitted from the wire shape when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    /// Materializes a validated draft into a record with the given ID.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - Unspecified priority defaults to `Priority::Medium`.
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            subject: draft.subject,
            due_date: draft.due_date,
            priority: draft.priority.unwrap_or_default(),
            completed: false,
            notes: draft.notes,
        }
    }

    /// Parses the stored due date for display purposes.
    ///
    /// Returns `None` when the stored string is not a valid `YYYY-MM-DD`
    /// calendar date.
    pub fn due_date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d").ok()
    }

    /// Checks record-level invariants.
    ///
    /// Used by read paths to reject invalid persisted state instead of
    /// masking it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::MissingField { field: "title" });
        }
        if is_blank(&self.subject) {
            return Err(ValidationError::MissingField { field: "subject" });
        }
        if is_blank(&self.due_date) {
            return Err(ValidationError::MissingField { field: "dueDate" });
        }
        Ok(())
    }
}

/// Creation input for a task, prior to ID assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub subject: String,
    pub due_date: String,
    /// `None` means "use the default priority" (`Medium`).
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl TaskDraft {
    /// Checks the required-field gate for task creation.
    ///
    /// # Contract
    /// - `title`, `subject` and `due_date` must be non-blank.
    /// - `priority` and `notes` are optional.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::MissingField { field: "title" });
        }
        if is_blank(&self.subject) {
            return Err(ValidationError::MissingField { field: "subject" });
        }
        if is_blank(&self.due_date) {
            return Err(ValidationError::MissingField { field: "dueDate" });
        }
        Ok(())
    }
}
