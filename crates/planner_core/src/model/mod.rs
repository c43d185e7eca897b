//! Domain model for planner records.
//!
//! # Responsibility
//! - Define the canonical `Task` and `StudySession` records.
//! - Provide draft (creation-input) types and their validation rules.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - Required text fields are non-blank; session durations are positive.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod session;
pub mod task;

pub use session::{parse_duration, SessionDraft, SessionId, StudySession};
pub use task::{Priority, Task, TaskDraft, TaskId};

/// Validation failure for draft input or persisted record state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    MissingField { field: &'static str },
    /// A session duration is zero.
    NonPositiveDuration,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "required field `{field}` is empty"),
            Self::NonPositiveDuration => write!(f, "duration must be a positive number of minutes"),
        }
    }
}

impl Error for ValidationError {}

/// Returns whether a required text field should be treated as empty.
///
/// Whitespace-only input counts as empty so a title of `"   "` cannot pass
/// the required-field gate.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
