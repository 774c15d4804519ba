//! Persistence adapter for the todo collection.
//!
//! # Responsibility
//! - Define the storage contract: whole-collection snapshots in one slot.
//! - Provide the SQLite-backed slot plus an in-process variant for tests
//!   and host-less runs.
//!
//! # Invariants
//! - Every save overwrites the full slot value; nothing is ever appended.
//! - Load never fails the caller: absence and corruption become an empty
//!   collection, individually ill-formed entries are dropped with a warn.

use crate::db::DbError;
use crate::model::todo::Todo;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
mod memory;
mod sqlite;

pub use memory::MemoryTodoStorage;
pub use sqlite::SqliteTodoStorage;

/// Fixed key of the one slot holding the serialized todo collection.
pub const TODOS_SLOT_KEY: &str = "todos";

pub type StorageResult<T> = Result<T, StorageError>;

/// Save-side storage failures. The load side deliberately has none.
#[derive(Debug)]
pub enum StorageError {
    /// Database open/bootstrap/transport failure.
    Db(DbError),
    /// The collection could not be serialized into the slot value.
    Encode(serde_json::Error),
    /// Connection handed in before migrations ran.
    UninitializedDatabase {
        expected_version: u32,
        actual_version: u32,
    },
    /// Migrated database is missing the `slots` table.
    MissingSlotTable,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to serialize todo collection: {err}"),
            Self::UninitializedDatabase {
                expected_version,
                actual_version,
            } => write!(
                f,
                "database not migrated: user_version {actual_version}, expected {expected_version}"
            ),
            Self::MissingSlotTable => write!(f, "database is missing the slots table"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Storage contract for the todo collection.
///
/// Implementations persist whole-collection snapshots; the store never asks
/// for incremental writes.
pub trait TodoStorage {
    /// Overwrites the persisted collection with `todos`.
    fn save(&mut self, todos: &[Todo]) -> StorageResult<()>;

    /// Loads the persisted collection.
    ///
    /// Missing slot and undecodable slot value both yield an empty vec;
    /// this is the "never fails the process at startup" edge of the
    /// contract, so no error type appears here.
    fn load(&mut self) -> Vec<Todo>;
}
