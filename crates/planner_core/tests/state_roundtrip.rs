use planner_core::db::open_db;
use planner_core::db::open_db_in_memory;
use planner_core::{
    PlannerStore, Priority, RepoError, SessionDraft, SqliteKvRepository, StateRepository,
    StudySession, Task, TaskDraft, SESSIONS_KEY, TASKS_KEY,
};
use rusqlite::Connection;
use uuid::Uuid;

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::from_draft(
            Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap(),
            TaskDraft {
                title: "Read Ch.5".to_string(),
                subject: "Physics".to_string(),
                due_date: "2024-06-01".to_string(),
                priority: Some(Priority::High),
                notes: Some("focus on thermodynamics".to_string()),
            },
        ),
        Task::from_draft(
            Uuid::parse_str("00000000-0000-4000-8000-000000000002").unwrap(),
            TaskDraft {
                title: "Problem set 3".to_string(),
                subject: "Calculus".to_string(),
                due_date: "2024-06-05".to_string(),
                ..TaskDraft::default()
            },
        ),
    ]
}

fn sample_sessions() -> Vec<StudySession> {
    vec![
        StudySession::from_draft(
            Uuid::parse_str("00000000-0000-4000-8000-000000000011").unwrap(),
            SessionDraft {
                subject: "Calculus".to_string(),
                duration: 45,
                date: "2024-06-01".to_string(),
            },
        ),
        StudySession::from_draft(
            Uuid::parse_str("00000000-0000-4000-8000-000000000012").unwrap(),
            SessionDraft {
                subject: "Physics".to_string(),
                duration: 90,
                date: "2024-06-02".to_string(),
            },
        ),
    ]
}

#[test]
fn save_and_load_reproduce_identical_ordered_collections() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    let tasks = sample_tasks();
    let sessions = sample_sessions();
    repo.save_tasks(&tasks).unwrap();
    repo.save_sessions(&sessions).unwrap();

    assert_eq!(repo.load_tasks().unwrap(), tasks);
    assert_eq!(repo.load_sessions().unwrap(), sessions);
}

#[test]
fn missing_keys_load_as_empty_collections() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    assert_eq!(repo.load_tasks().unwrap(), Vec::<Task>::new());
    assert_eq!(repo.load_sessions().unwrap(), Vec::<StudySession>::new());
}

#[test]
fn collections_persist_under_their_own_keys() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    repo.save_tasks(&sample_tasks()).unwrap();
    repo.save_sessions(&sample_sessions()).unwrap();

    let stored_keys: Vec<String> = {
        let mut stmt = conn
            .prepare("SELECT key FROM planner_kv ORDER BY key;")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    };
    assert_eq!(stored_keys, [SESSIONS_KEY, TASKS_KEY]);

    // Task payload keeps the original wire shape under its key.
    let payload: String = conn
        .query_row(
            "SELECT value FROM planner_kv WHERE key = ?1;",
            [TASKS_KEY],
            |row| row.get(0),
        )
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value[0]["dueDate"], "2024-06-01");
    assert_eq!(value[0]["priority"], "high");
    assert!(value[1].as_object().unwrap().get("notes").is_none());
}

#[test]
fn round_trip_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.db");

    let tasks = sample_tasks();
    let sessions = sample_sessions();
    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteKvRepository::try_new(&conn).unwrap();
        repo.save_tasks(&tasks).unwrap();
        repo.save_sessions(&sessions).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = PlannerStore::load(SqliteKvRepository::try_new(&conn).unwrap());
    assert_eq!(store.tasks(), tasks.as_slice());
    assert_eq!(store.sessions(), sessions.as_slice());
    assert_eq!(store.total_study_minutes(), 135);
    assert_eq!(store.completed_task_count(), 0);
}

#[test]
fn corrupt_payload_is_a_repo_error_and_an_empty_store() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO planner_kv (key, value) VALUES (?1, ?2);",
        [TASKS_KEY, "{not json"],
    )
    .unwrap();

    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let err = repo.load_tasks().unwrap_err();
    assert!(matches!(err, RepoError::CorruptPayload { key, .. } if key == TASKS_KEY));

    // The store downgrades the corrupt collection to empty instead of failing.
    let store = PlannerStore::load(SqliteKvRepository::try_new(&conn).unwrap());
    assert_eq!(store.task_count(), 0);
}

#[test]
fn invalid_persisted_record_is_rejected_on_load() {
    let conn = open_db_in_memory().unwrap();
    let payload = serde_json::json!([{
        "id": "00000000-0000-4000-8000-000000000021",
        "subject": "Physics",
        "duration": 0,
        "date": "2024-06-01"
    }])
    .to_string();
    conn.execute(
        "INSERT INTO planner_kv (key, value) VALUES (?1, ?2);",
        [SESSIONS_KEY, payload.as_str()],
    )
    .unwrap();

    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let err = repo.load_sessions().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_storage_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        planner_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteKvRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("planner_kv"))
    ));
}
