//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the reminder lifecycle to Dart via FRB as stable sync calls.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures come back inside response envelopes, never as exceptions.
//! - Todo ids travel as strings; reminder instants as epoch milliseconds.

use chrono::{DateTime, TimeZone, Utc};
use log::warn;
use once_cell::sync::OnceCell;
use remindo_core::{
    core_version as core_version_inner, format_reminder, has_passed,
    init_logging as init_logging_inner, install_presentation_policy, ping as ping_inner,
    PresentationPolicy, SqliteTodoStorage, ThreadScheduler, Todo, TodoStore,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;
use uuid::Uuid;

const DB_FILE_NAME: &str = "remindo.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: OnceCell<Mutex<TodoStore>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive);
///   empty selects the build-mode default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Installs the notification presentation policy once per process.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Safe to call repeatedly with the same flags (idempotent).
/// - Conflicting flags after the first install return an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_notification_policy(alert: bool, sound: bool, badge: bool) -> String {
    match install_presentation_policy(PresentationPolicy {
        alert,
        sound,
        badge,
    }) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One todo row shaped for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListItem {
    /// Stable todo ID in string form.
    pub todo_id: String,
    /// Trimmed display text.
    pub text: String,
    /// Reminder instant in epoch milliseconds (UTC).
    pub reminder_epoch_ms: i64,
    /// Preformatted 12-hour wall-clock rendering of the reminder.
    pub display_time: String,
    /// Whether the reminder instant lay in the past at list time.
    pub passed: bool,
}

/// List response envelope for the todo list flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    /// Todos in display order (empty when none or on failure).
    pub items: Vec<TodoListItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for todo command flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// The affected todo ID, when the operation touched one.
    pub todo_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, todo_id: String) -> Self {
        Self {
            ok: true,
            todo_id: Some(todo_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            todo_id: None,
            message: message.into(),
        }
    }
}

/// Adds a todo and schedules its reminder notification.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Text is trimmed; text that trims to empty is rejected.
/// - Never panics.
/// - Returns the created todo ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(text: String, reminder_epoch_ms: i64) -> TodoActionResponse {
    let Some(reminder) = datetime_from_epoch_ms(reminder_epoch_ms) else {
        return TodoActionResponse::failure(format!(
            "todo_add failed: reminder timestamp {reminder_epoch_ms} is out of range"
        ));
    };

    match with_store(|store| store.add(text.as_str(), reminder).map_err(|err| err.to_string())) {
        Ok(todo) => TodoActionResponse::success("Todo added.", todo.id.to_string()),
        Err(err) => TodoActionResponse::failure(format!("todo_add failed: {err}")),
    }
}

/// Removes a todo by its stable ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - An already-scheduled notification still fires; removal never cancels.
/// - Never panics.
/// - Returns the removed todo ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_remove(todo_id: String) -> TodoActionResponse {
    let id = match Uuid::parse_str(todo_id.trim()) {
        Ok(id) => id,
        Err(err) => {
            return TodoActionResponse::failure(format!(
                "todo_remove failed: invalid todo id: {err}"
            ));
        }
    };

    match with_store(|store| store.remove(id).map_err(|err| err.to_string())) {
        Ok(removed) => TodoActionResponse::success("Todo removed.", removed.id.to_string()),
        Err(err) => TodoActionResponse::failure(format!("todo_remove failed: {err}")),
    }
}

/// Lists todos in display order with presentation fields precomputed.
///
/// # FFI contract
/// - Sync call, DB-backed on first use only; later calls serve memory.
/// - `passed` and `display_time` are evaluated at list time, so a pending
///   reminder can flip to passed between two calls.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> TodoListResponse {
    match with_store(|store| Ok(store.todos().to_vec())) {
        Ok(todos) => {
            let items = todos.iter().map(to_list_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No todos.".to_string()
            } else {
                format!("{} todo(s).", items.len())
            };
            TodoListResponse { items, message }
        }
        Err(err) => TodoListResponse {
            items: Vec::new(),
            message: format!("todo_list failed: {err}"),
        },
    }
}

/// Waits until queued saves reached the database, or `timeout_ms` elapses.
///
/// # FFI contract
/// - Sync call; blocks the calling thread up to `timeout_ms`.
/// - Intended for host lifecycle hooks (backgrounding, shutdown).
/// - Never panics; returns whether the write queue drained in time.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_flush(timeout_ms: u64) -> bool {
    with_store(|store| Ok(store.flush(Duration::from_millis(timeout_ms)))).unwrap_or(false)
}

fn datetime_from_epoch_ms(epoch_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(epoch_ms).single()
}

fn to_list_item(todo: &Todo) -> TodoListItem {
    TodoListItem {
        todo_id: todo.id.to_string(),
        text: todo.text.clone(),
        reminder_epoch_ms: todo.reminder.timestamp_millis(),
        display_time: format_reminder(&todo.reminder),
        passed: has_passed(&todo.reminder),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("REMINDO_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(&mut TodoStore) -> Result<T, String>) -> Result<T, String> {
    let store = STORE.get_or_try_init(open_store)?;
    let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

// A failed open is not cached; the next call retries, so a transient
// file-system problem at startup does not brick the store for the process.
fn open_store() -> Result<Mutex<TodoStore>, String> {
    let path = resolve_db_path();
    let storage = SqliteTodoStorage::open(&path).map_err(|err| {
        warn!("event=store_open module=ffi status=error error={err}");
        format!("todo store open failed: {err}")
    })?;
    let scheduler = Arc::new(ThreadScheduler::with_log_sink());
    Ok(Mutex::new(TodoStore::open(storage, scheduler)))
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, init_notification_policy, ping, todo_add, todo_flush,
        todo_list, todo_remove,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    // 2023-11-14T22:13:20Z, safely in the past.
    const PAST_EPOCH_MS: i64 = 1_700_000_000_000;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    // The policy gate is process-global, so the idempotent and conflict
    // cases must run inside one test.
    #[test]
    fn init_notification_policy_is_idempotent_then_rejects_conflicts() {
        assert!(init_notification_policy(true, true, true).is_empty());
        assert!(init_notification_policy(true, true, true).is_empty());

        let error = init_notification_policy(true, false, true);
        assert!(error.contains("refusing to switch"));
    }

    #[test]
    fn todo_add_list_remove_round_trip() {
        let text = unique_token("round-trip");

        let added = todo_add(format!("  {text}  "), PAST_EPOCH_MS);
        assert!(added.ok, "{}", added.message);
        let todo_id = added.todo_id.clone().expect("added todo should carry id");

        let listed = todo_list();
        let item = listed
            .items
            .iter()
            .find(|item| item.todo_id == todo_id)
            .expect("added todo should be listed");
        assert_eq!(item.text, text, "text should be trimmed");
        assert_eq!(item.reminder_epoch_ms, PAST_EPOCH_MS);
        assert!(item.passed, "a 2023 reminder has passed");
        assert_eq!(item.display_time.len(), 11, "hh:mm:ss AM|PM shape");

        let removed = todo_remove(todo_id.clone());
        assert!(removed.ok, "{}", removed.message);
        assert_eq!(removed.todo_id.as_deref(), Some(todo_id.as_str()));

        let after = todo_list();
        assert!(after.items.iter().all(|item| item.todo_id != todo_id));
    }

    #[test]
    fn todo_add_rejects_whitespace_only_text() {
        let response = todo_add("   ".to_string(), PAST_EPOCH_MS);
        assert!(!response.ok);
        assert!(response.todo_id.is_none());
        assert!(response.message.contains("empty"), "{}", response.message);
    }

    #[test]
    fn todo_add_rejects_out_of_range_timestamp() {
        let response = todo_add(unique_token("overflow"), i64::MAX);
        assert!(!response.ok);
        assert!(response.message.contains("out of range"));
    }

    #[test]
    fn todo_remove_rejects_malformed_id() {
        let response = todo_remove("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid todo id"));
    }

    #[test]
    fn todo_remove_reports_unknown_id() {
        let response = todo_remove(uuid::Uuid::new_v4().to_string());
        assert!(!response.ok);
        assert!(response.message.contains("no todo"), "{}", response.message);
    }

    #[test]
    fn todo_flush_drains_the_write_queue() {
        let added = todo_add(unique_token("flush"), PAST_EPOCH_MS);
        assert!(added.ok, "{}", added.message);
        assert!(todo_flush(5_000));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
