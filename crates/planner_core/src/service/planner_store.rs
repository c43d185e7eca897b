//! Planner store: authoritative in-memory state plus derived aggregates.
//!
//! # Responsibility
//! - Own the task and session collections for the life of the process.
//! - Mirror every mutation to durable storage, one key per collection.
//! - Compute derived aggregates on demand from current state.
//!
//! # Invariants
//! - Collections keep insertion order, oldest first.
//! - `completed` only changes via `toggle_task`.
//! - Validation failure and lookup miss are silent no-ops, never errors.
//! - A storage failure never crashes the store: loads fall back to empty,
//!   saves are best-effort and logged.

use crate::model::{SessionDraft, SessionId, StudySession, Task, TaskDraft, TaskId};
use crate::repo::state_repo::StateRepository;
use log::{debug, warn};
use uuid::Uuid;

/// In-memory planner state mirrored to a durable key-value repository.
pub struct PlannerStore<R: StateRepository> {
    repo: R,
    tasks: Vec<Task>,
    sessions: Vec<StudySession>,
}

impl<R: StateRepository> PlannerStore<R> {
    /// Loads persisted state through the repository.
    ///
    /// # Contract
    /// - A missing key yields an empty collection.
    /// - A failed or corrupt load yields an empty collection and a warning
    ///   log; it never surfaces as an error.
    pub fn load(repo: R) -> Self {
        let tasks = match repo.load_tasks() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=state_load module=service status=error collection=tasks error={err}"
                );
                Vec::new()
            }
        };
        let sessions = match repo.load_sessions() {
            Ok(sessions) => sessions,
            Err(err) => {
                warn!(
                    "event=state_load module=service status=error collection=sessions error={err}"
                );
                Vec::new()
            }
        };

        debug!(
            "event=state_load module=service status=ok tasks={} sessions={}",
            tasks.len(),
            sessions.len()
        );

        Self {
            repo,
            tasks,
            sessions,
        }
    }

    /// Current task collection, insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current session collection, insertion order.
    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Creates a task from a draft.
    ///
    /// # Contract
    /// - Assigns a fresh collision-resistant ID and `completed = false`.
    /// - Appends to the end of the collection and persists.
    /// - Returns `None` without touching state when the draft fails the
    ///   required-field gate.
    pub fn add_task(&mut self, draft: TaskDraft) -> Option<TaskId> {
        if let Err(err) = draft.validate() {
            debug!("event=add_task module=service status=rejected reason={err}");
            return None;
        }

        let task = Task::from_draft(Uuid::new_v4(), draft);
        let id = task.id;
        self.tasks.push(task);
        self.persist_tasks();
        Some(id)
    }

    /// Flips `completed` for the matching task.
    ///
    /// Returns `false` (no-op, nothing persisted) when the ID is absent.
    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.persist_tasks();
        true
    }

    /// Removes the matching task permanently.
    ///
    /// Returns `false` (no-op, nothing persisted) when the ID is absent.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist_tasks();
        true
    }

    /// Logs a study session from a draft.
    ///
    /// # Contract
    /// - Assigns a fresh collision-resistant ID, appends and persists.
    /// - Returns `None` without touching state when the draft fails
    ///   validation (blank subject/date or zero duration).
    pub fn add_session(&mut self, draft: SessionDraft) -> Option<SessionId> {
        if let Err(err) = draft.validate() {
            debug!("event=add_session module=service status=rejected reason={err}");
            return None;
        }

        let session = StudySession::from_draft(Uuid::new_v4(), draft);
        let id = session.id;
        self.sessions.push(session);
        self.persist_sessions();
        Some(id)
    }

    /// Removes the matching session permanently.
    ///
    /// Returns `false` (no-op, nothing persisted) when the ID is absent.
    pub fn delete_session(&mut self, id: SessionId) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|session| session.id != id);
        if self.sessions.len() == before {
            return false;
        }
        self.persist_sessions();
        true
    }

    /// Sum of session durations in minutes; 0 when no sessions exist.
    pub fn total_study_minutes(&self) -> u64 {
        self.sessions
            .iter()
            .map(|session| u64::from(session.duration))
            .sum()
    }

    /// Total study time in fractional hours, as shown by stats views.
    pub fn total_study_hours(&self) -> f64 {
        self.total_study_minutes() as f64 / 60.0
    }

    /// Number of tasks currently marked completed.
    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    fn persist_tasks(&self) {
        if let Err(err) = self.repo.save_tasks(&self.tasks) {
            warn!("event=state_save module=service status=error collection=tasks error={err}");
        }
    }

    fn persist_sessions(&self) {
        if let Err(err) = self.repo.save_sessions(&self.sessions) {
            warn!("event=state_save module=service status=error collection=sessions error={err}");
        }
    }
}
