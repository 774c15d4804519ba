//! Todo store use-case layer.
//!
//! # Responsibility
//! - Expose the add/remove/list entry points core callers use.
//! - Tie the in-memory list to persistence and notification scheduling.
//!
//! # Invariants
//! - Store APIs never bypass model validation.
//! - The store stays storage-agnostic behind the [`TodoStorage`] seam.
//!
//! [`TodoStorage`]: crate::storage::TodoStorage

use crate::model::todo::TodoId;
use std::fmt;

mod persist_queue;
mod todo_store;

pub use persist_queue::PersistQueue;
pub use todo_store::TodoStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Todo text was empty after trimming.
    EmptyText,
    /// Positional removal referenced a slot outside the list.
    InvalidIndex { index: usize, len: usize },
    /// No todo with the given id exists.
    NotFound(TodoId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text cannot be empty"),
            Self::InvalidIndex { index, len } => {
                write!(f, "todo index {index} is out of bounds for length {len}")
            }
            Self::NotFound(id) => write!(f, "no todo with id {id}"),
        }
    }
}

impl std::error::Error for StoreError {}
