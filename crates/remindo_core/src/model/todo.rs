//! Todo domain model.
//!
//! # Responsibility
//! - Define the one entity of the system: display text plus a reminder
//!   instant, addressable by a stable id.
//! - Validate text and id at every construction path, including the wire.
//!
//! # Invariants
//! - `id` is a non-nil UUID, generated at creation and never reused.
//! - `text` is trimmed and non-empty.
//! - `reminder` is set once, at creation; nothing in core mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one todo.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = Uuid;

/// Validation failures for todo construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Input text was empty or whitespace-only after trimming.
    EmptyText,
    /// The nil UUID is reserved and never a valid todo id.
    NilId,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text must not be empty or whitespace-only"),
            Self::NilId => write!(f, "todo id must not be the nil uuid"),
        }
    }
}

impl Error for TodoValidationError {}

/// One to-do record: display text paired with a single reminder instant.
///
/// The reminder is a UTC instant and serializes as an RFC-3339 string, the
/// same `Date` JSON form older app builds persisted, so their slots parse
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoWire")]
pub struct Todo {
    /// Stable id used for removal, lookup and scheduling diagnostics.
    pub id: TodoId,
    /// Trimmed, non-empty display text.
    pub text: String,
    /// The instant the reminder notification should fire.
    pub reminder: DateTime<Utc>,
}

impl Todo {
    /// Creates a todo with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyText` when `text` trims to nothing.
    pub fn new(
        text: impl Into<String>,
        reminder: DateTime<Utc>,
    ) -> Result<Self, TodoValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            text: normalized_text(text)?,
            reminder,
        })
    }

    /// Creates a todo with a caller-provided stable id.
    ///
    /// Used by storage decode paths where identity already exists.
    ///
    /// # Errors
    /// - `EmptyText` when `text` trims to nothing.
    /// - `NilId` when `id` is the nil uuid.
    pub fn with_id(
        id: TodoId,
        text: impl Into<String>,
        reminder: DateTime<Utc>,
    ) -> Result<Self, TodoValidationError> {
        if id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        Ok(Self {
            id,
            text: normalized_text(text)?,
            reminder,
        })
    }
}

/// Wire shape accepted when deserializing a todo.
///
/// `id` is optional so slot data written before ids existed (plain
/// `{text, reminder}` entries) still loads; a fresh id is minted for it.
#[derive(Deserialize)]
struct TodoWire {
    #[serde(default)]
    id: Option<TodoId>,
    text: String,
    reminder: DateTime<Utc>,
}

impl TryFrom<TodoWire> for Todo {
    type Error = TodoValidationError;

    fn try_from(wire: TodoWire) -> Result<Self, Self::Error> {
        match wire.id {
            Some(id) => Todo::with_id(id, wire.text, wire.reminder),
            None => Todo::new(wire.text, wire.reminder),
        }
    }
}

fn normalized_text(text: impl Into<String>) -> Result<String, TodoValidationError> {
    let trimmed = text.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(TodoValidationError::EmptyText);
    }
    Ok(trimmed)
}
