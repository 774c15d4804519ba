use chrono::{TimeZone, Utc};
use remindo_core::db::migrations::latest_version;
use remindo_core::db::DbError;
use remindo_core::{
    MemoryTodoStorage, SqliteTodoStorage, StorageError, Todo, TodoStorage, TODOS_SLOT_KEY,
};
use rusqlite::Connection;

fn sample_todos() -> Vec<Todo> {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
    vec![
        Todo::new("buy milk", base).unwrap(),
        Todo::new("call dentist", base + chrono::Duration::hours(2)).unwrap(),
    ]
}

#[test]
fn save_then_load_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("remindo.db");
    let todos = sample_todos();

    let mut storage = SqliteTodoStorage::open(&path).unwrap();
    storage.save(&todos).unwrap();
    drop(storage);

    let mut reopened = SqliteTodoStorage::open(&path).unwrap();
    assert_eq!(reopened.load(), todos);
}

#[test]
fn load_before_any_save_is_empty() {
    let mut storage = SqliteTodoStorage::in_memory().unwrap();
    assert!(storage.load().is_empty());
}

#[test]
fn repeated_saves_replace_the_snapshot() {
    let mut storage = SqliteTodoStorage::in_memory().unwrap();
    let todos = sample_todos();

    storage.save(&todos).unwrap();
    storage.save(&todos[..1]).unwrap();

    assert_eq!(storage.load(), todos[..1]);
}

#[test]
fn malformed_slot_document_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("remindo.db");

    let mut storage = SqliteTodoStorage::open(&path).unwrap();
    storage.save(&sample_todos()).unwrap();
    drop(storage);

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "UPDATE slots SET value = 'definitely not json' WHERE key = ?1;",
        [TODOS_SLOT_KEY],
    )
    .unwrap();
    drop(conn);

    let mut reopened = SqliteTodoStorage::open(&path).unwrap();
    assert!(reopened.load().is_empty());
}

#[test]
fn legacy_entries_without_ids_load_with_minted_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("remindo.db");

    // Migrate the file, then plant a pre-id snapshot by hand.
    drop(SqliteTodoStorage::open(&path).unwrap());
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, 0);",
        rusqlite::params![
            TODOS_SLOT_KEY,
            r#"[{"text":"pay rent","reminder":"2024-06-01T08:30:00Z"}]"#
        ],
    )
    .unwrap();
    drop(conn);

    let mut storage = SqliteTodoStorage::open(&path).unwrap();
    let loaded = storage.load();

    assert_eq!(loaded.len(), 1);
    assert!(!loaded[0].id.is_nil());
    assert_eq!(loaded[0].text, "pay rent");
    assert_eq!(
        loaded[0].reminder,
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
    );
}

#[test]
fn try_new_rejects_an_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteTodoStorage::try_new(conn).unwrap_err();
    match err {
        StorageError::UninitializedDatabase {
            expected_version,
            actual_version,
        } => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn try_new_rejects_a_newer_schema_version() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();

    let err = SqliteTodoStorage::try_new(conn).unwrap_err();
    match err {
        StorageError::Db(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn try_new_requires_the_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let err = SqliteTodoStorage::try_new(conn).unwrap_err();
    assert!(matches!(err, StorageError::MissingSlotTable));
}

#[test]
fn memory_storage_uses_the_same_slot_semantics() {
    let mut storage = MemoryTodoStorage::new();
    assert!(storage.load().is_empty());
    assert!(storage.raw_value().is_none());

    let todos = sample_todos();
    storage.save(&todos).unwrap();
    assert_eq!(storage.load(), todos);
    assert!(storage.raw_value().is_some());

    storage.set_raw_value("definitely not json");
    assert!(storage.load().is_empty());
}
