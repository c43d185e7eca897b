//! Study session domain model.
//!
//! # Responsibility
//! - Define the logged study-session record and its creation draft.
//! - Provide the textual duration conversion used by form-style callers.
//!
//! # Invariants
//! - `id` is stable and never reused for another session.
//! - `duration` is a strictly positive number of minutes.

use super::{is_blank, ValidationError};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a study session.
pub type SessionId = Uuid;

/// A logged, completed block of study time for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    /// Stable ID used for delete addressing.
    pub id: SessionId,
    pub subject: String,
    /// Duration in minutes, strictly positive.
    pub duration: u32,
    /// Calendar date (or date-time) in string form.
    pub date: String,
}

impl StudySession {
    /// Materializes a validated draft into a record with the given ID.
    pub fn from_draft(id: SessionId, draft: SessionDraft) -> Self {
        Self {
            id,
            subject: draft.subject,
            duration: draft.duration,
            date: draft.date,
        }
    }

    /// Parses the stored date for display purposes.
    ///
    /// Accepts `YYYY-MM-DD` or an RFC 3339 date-time; returns `None` for
    /// anything else.
    pub fn date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.date)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.subject) {
            return Err(ValidationError::MissingField { field: "subject" });
        }
        if self.duration == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        if is_blank(&self.date) {
            return Err(ValidationError::MissingField { field: "date" });
        }
        Ok(())
    }
}

/// Creation input for a study session, prior to ID assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDraft {
    pub subject: String,
    /// Duration in minutes. Callers with textual input convert it through
    /// [`parse_duration`] first.
    pub duration: u32,
    pub date: String,
}

impl SessionDraft {
    /// Checks the required-field gate for session logging.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.subject) {
            return Err(ValidationError::MissingField { field: "subject" });
        }
        if self.duration == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        if is_blank(&self.date) {
            return Err(ValidationError::MissingField { field: "date" });
        }
        Ok(())
    }
}

/// Converts textual duration input into validated minutes.
///
/// Returns `None` for non-numeric, negative or zero input, so form callers
/// can treat any failure as "reject the submission".
pub fn parse_duration(input: &str) -> Option<u32> {
    let minutes: u32 = input.trim().parse().ok()?;
    (minutes > 0).then_some(minutes)
}
