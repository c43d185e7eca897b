//! Planner state repository contracts and SQLite key-value implementation.
//!
//! # Responsibility
//! - Provide whole-collection load/save APIs over durable key-value storage.
//! - Keep SQL and JSON serialization details inside the persistence boundary.
//!
//! # Invariants
//! - Tasks and sessions are stored independently under `studyTasks` and
//!   `studySessions`.
//! - Save paths rewrite the full collection; there is no partial write.
//! - Load paths validate every record and reject corrupt payloads.

use crate::db::DbError;
use crate::model::{StudySession, Task, ValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the serialized task collection.
pub const TASKS_KEY: &str = "studyTasks";
/// Storage key for the serialized session collection.
pub const SESSIONS_KEY: &str = "studySessions";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for planner state persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Payload under a key could not be converted to or from the expected
    /// JSON collection shape.
    CorruptPayload {
        key: &'static str,
        source: serde_json::Error,
    },
    /// A decoded record violates a model invariant.
    InvalidData(String),
    /// Connection has not been migrated (`PRAGMA user_version` is stale).
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Connection is migrated but the storage table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::CorruptPayload { key, source } => {
                write!(f, "corrupt payload under key `{key}`: {source}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted planner data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::CorruptPayload { source, .. } => Some(source),
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for whole-collection planner state persistence.
///
/// A missing key is an empty collection, not an error; only transport
/// failures and corrupt payloads surface as `Err`.
pub trait StateRepository {
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
    fn load_sessions(&self) -> RepoResult<Vec<StudySession>>;
    fn save_sessions(&self, sessions: &[StudySession]) -> RepoResult<()>;
}

/// SQLite-backed key-value state repository.
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Wraps a connection after verifying it is ready for planner state.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when `planner_kv` is absent despite the
    ///   schema version claiming otherwise.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'planner_kv'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("planner_kv"));
        }

        Ok(Self { conn })
    }

    fn load_value(&self, key: &'static str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM planner_kv WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save_value(&self, key: &'static str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO planner_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

impl StateRepository for SqliteKvRepository<'_> {
    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        let Some(payload) = self.load_value(TASKS_KEY)? else {
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_str(&payload).map_err(|source| {
            RepoError::CorruptPayload {
                key: TASKS_KEY,
                source,
            }
        })?;
        for task in &tasks {
            task.validate()
                .map_err(|err| invalid_record(TASKS_KEY, task.id, err))?;
        }
        Ok(tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let payload = serde_json::to_string(tasks).map_err(|source| RepoError::CorruptPayload {
            key: TASKS_KEY,
            source,
        })?;
        self.save_value(TASKS_KEY, &payload)
    }

    fn load_sessions(&self) -> RepoResult<Vec<StudySession>> {
        let Some(payload) = self.load_value(SESSIONS_KEY)? else {
            return Ok(Vec::new());
        };

        let sessions: Vec<StudySession> =
            serde_json::from_str(&payload).map_err(|source| RepoError::CorruptPayload {
                key: SESSIONS_KEY,
                source,
            })?;
        for session in &sessions {
            session
                .validate()
                .map_err(|err| invalid_record(SESSIONS_KEY, session.id, err))?;
        }
        Ok(sessions)
    }

    fn save_sessions(&self, sessions: &[StudySession]) -> RepoResult<()> {
        let payload =
            serde_json::to_string(sessions).map_err(|source| RepoError::CorruptPayload {
                key: SESSIONS_KEY,
                source,
            })?;
        self.save_value(SESSIONS_KEY, &payload)
    }
}

fn invalid_record(key: &'static str, id: uuid::Uuid, err: ValidationError) -> RepoError {
    RepoError::InvalidData(format!("record {id} under key `{key}`: {err}"))
}
