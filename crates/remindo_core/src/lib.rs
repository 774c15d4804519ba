//! Core domain logic for Remindo.
//! This crate is the single source of truth for the reminder lifecycle.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod storage;
pub mod store;

pub use clock::{format_reminder, format_time_of_day, has_passed, has_passed_at};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{Todo, TodoId, TodoValidationError};
pub use notify::policy::{install_presentation_policy, presentation_policy, PresentationPolicy};
pub use notify::{
    LogSink, NotificationRequest, NotificationScheduler, NotificationSink, ScheduleError,
    ScheduleHandle, ScheduleResult, ThreadScheduler, NOTIFICATION_TITLE,
};
pub use storage::{
    MemoryTodoStorage, SqliteTodoStorage, StorageError, StorageResult, TodoStorage,
    TODOS_SLOT_KEY,
};
pub use store::{StoreError, StoreResult, TodoStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
