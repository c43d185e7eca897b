//! Core domain logic for the study planner.
//! This crate is the single source of truth for planner state invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    parse_duration, Priority, SessionDraft, SessionId, StudySession, Task, TaskDraft, TaskId,
    ValidationError,
};
pub use repo::state_repo::{
    RepoError, RepoResult, SqliteKvRepository, StateRepository, SESSIONS_KEY, TASKS_KEY,
};
pub use service::planner_store::PlannerStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
