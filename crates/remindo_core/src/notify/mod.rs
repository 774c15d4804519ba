//! Reminder notification scheduling.
//!
//! # Responsibility
//! - Describe the local notification produced for a todo reminder.
//! - Define the scheduler seam the store hands reminders to.
//!
//! # Invariants
//! - Notification bodies embed the todo text; log lines never do.
//! - `schedule` returns a handle immediately; delivery happens later on the
//!   scheduler's worker.

use crate::model::todo::Todo;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

pub mod policy;
mod thread_scheduler;

pub use thread_scheduler::{LogSink, NotificationSink, ThreadScheduler};

/// Title shared by every reminder notification.
pub const NOTIFICATION_TITLE: &str = "To-Do Reminder";

/// One local notification to be presented at `fire_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

impl NotificationRequest {
    /// Builds the reminder notification for a todo.
    pub fn for_todo(todo: &Todo) -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            body: format!("Don't forget about your to-do: {}", todo.text),
            fire_at: todo.reminder,
        }
    }
}

/// Opaque identifier for one accepted schedule request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(Uuid);

impl ScheduleHandle {
    /// Mints a fresh handle for one accepted request.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ScheduleHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(Debug, PartialEq, Eq)]
pub enum ScheduleError {
    /// The scheduler worker has shut down and accepts no further requests.
    QueueClosed,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueClosed => write!(f, "notification queue is closed"),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Delivery seam for reminder notifications.
///
/// The store keeps one scheduler for its whole lifetime and calls `schedule`
/// once per added todo. Implementations decide how and where the
/// notification surfaces.
pub trait NotificationScheduler: Send + Sync {
    fn schedule(&self, request: NotificationRequest) -> ScheduleResult<ScheduleHandle>;
}
