//! In-memory slot storage.
//!
//! # Responsibility
//! - Hold the encoded `todos` slot in process memory for tests and the CLI
//!   smoke probe.
//!
//! # Invariants
//! - Clones share one slot, so a store and a test can observe the same
//!   snapshot.

use crate::model::todo::Todo;
use crate::storage::{codec, StorageResult, TodoStorage};
use std::sync::{Arc, Mutex, PoisonError};

/// Volatile slot storage with the same codec as the SQLite backend.
#[derive(Clone, Default)]
pub struct MemoryTodoStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTodoStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw encoded slot, if one has been saved.
    pub fn raw_value(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the raw encoded slot, bypassing the codec.
    pub fn set_raw_value(&self, value: impl Into<String>) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.into());
    }
}

impl TodoStorage for MemoryTodoStorage {
    fn save(&mut self, todos: &[Todo]) -> StorageResult<()> {
        let value = codec::encode_slot(todos)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
        Ok(())
    }

    fn load(&mut self) -> Vec<Todo> {
        let raw = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match raw {
            Some(value) => codec::decode_slot(&value),
            None => Vec::new(),
        }
    }
}
