//! SQLite-backed slot storage.
//!
//! # Responsibility
//! - Persist the todo collection in the single `todos` slot row.
//! - Validate at construction that the connection is migrated and usable.
//!
//! # Invariants
//! - Saves are one UPSERT; the previous snapshot is always fully replaced.
//! - Load failures are logged and absorbed, never propagated.

use crate::db::migrations::latest_version;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::todo::Todo;
use crate::storage::{codec, StorageError, StorageResult, TodoStorage, TODOS_SLOT_KEY};
use chrono::Utc;
use log::{info, warn};
use rusqlite::{params, Connection};
use std::path::Path;

/// Durable slot storage over a migrated SQLite connection.
#[derive(Debug)]
pub struct SqliteTodoStorage {
    conn: Connection,
}

impl SqliteTodoStorage {
    /// Opens (creating if needed) the slot database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory slot database.
    pub fn in_memory() -> StorageResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Wraps an already opened connection after checking slot readiness.
    ///
    /// # Errors
    /// - `UninitializedDatabase` when migrations have not run.
    /// - `Db(UnsupportedSchemaVersion)` when the database is from a newer
    ///   build.
    /// - `MissingSlotTable` when the schema lacks the `slots` table.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        ensure_slot_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl TodoStorage for SqliteTodoStorage {
    fn save(&mut self, todos: &[Todo]) -> StorageResult<()> {
        let value = codec::encode_slot(todos)?;
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![TODOS_SLOT_KEY, value, Utc::now().timestamp_millis()],
        )?;

        info!(
            "event=slot_save module=storage status=ok slot={TODOS_SLOT_KEY} count={}",
            todos.len()
        );
        Ok(())
    }

    fn load(&mut self) -> Vec<Todo> {
        let raw = self.conn.query_row(
            "SELECT value FROM slots WHERE key = ?1;",
            [TODOS_SLOT_KEY],
            |row| row.get::<_, String>(0),
        );

        match raw {
            Ok(value) => {
                let todos = codec::decode_slot(&value);
                info!(
                    "event=slot_load module=storage status=ok slot={TODOS_SLOT_KEY} count={}",
                    todos.len()
                );
                todos
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                info!("event=slot_load module=storage status=empty slot={TODOS_SLOT_KEY}");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=slot_load module=storage status=error slot={TODOS_SLOT_KEY} error={err}"
                );
                Vec::new()
            }
        }
    }
}

fn ensure_slot_schema(conn: &Connection) -> StorageResult<()> {
    let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected = latest_version();

    if version < expected {
        return Err(StorageError::UninitializedDatabase {
            expected_version: expected,
            actual_version: version,
        });
    }
    if version > expected {
        return Err(StorageError::Db(DbError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported: expected,
        }));
    }

    let slots_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'slots'
        );",
        [],
        |row| row.get(0),
    )?;
    if slots_exists != 1 {
        return Err(StorageError::MissingSlotTable);
    }

    Ok(())
}
