//! Todo collection lifecycle.
//!
//! # Responsibility
//! - Own the in-memory todo list and its display ordering.
//! - Queue a persistence snapshot after every mutation.
//! - Hand each added reminder to the notification scheduler.
//!
//! # Invariants
//! - Todos keep insertion order; ids stay stable for the store's lifetime.
//! - Every successful mutation submits exactly one snapshot save.
//! - Scheduler and persistence failures never roll back a mutation.
//! - Removing a todo does not cancel its scheduled notification.

use crate::model::todo::{Todo, TodoId};
use crate::notify::{NotificationRequest, NotificationScheduler};
use crate::storage::TodoStorage;
use crate::store::{PersistQueue, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

/// In-memory todo list bound to one storage backend and one scheduler.
pub struct TodoStore {
    todos: Vec<Todo>,
    persist: PersistQueue,
    scheduler: Arc<dyn NotificationScheduler>,
}

impl TodoStore {
    /// Loads the saved snapshot and takes over the write path for `storage`.
    ///
    /// A snapshot that cannot be read or decoded yields an empty list; the
    /// storage layer has already logged the cause.
    pub fn open(
        mut storage: impl TodoStorage + Send + 'static,
        scheduler: Arc<dyn NotificationScheduler>,
    ) -> Self {
        let todos = storage.load();
        info!(
            "event=store_open module=store status=ok count={}",
            todos.len()
        );
        Self {
            todos,
            persist: PersistQueue::spawn(storage),
            scheduler,
        }
    }

    /// Adds a todo and schedules its reminder notification.
    ///
    /// # Contract
    /// - Text is trimmed; text that trims to empty is rejected with
    ///   [`StoreError::EmptyText`] and the list is untouched.
    /// - The new todo is appended after all existing todos.
    /// - A snapshot save is queued before this returns.
    pub fn add(&mut self, text: impl Into<String>, reminder: DateTime<Utc>) -> StoreResult<Todo> {
        let todo = match Todo::new(text, reminder) {
            Ok(todo) => todo,
            Err(_) => {
                info!("event=todo_add module=store status=rejected reason=empty_text");
                return Err(StoreError::EmptyText);
            }
        };

        self.todos.push(todo.clone());
        self.queue_snapshot();
        self.schedule_reminder(&todo);
        info!(
            "event=todo_add module=store status=ok id={} count={}",
            todo.id,
            self.todos.len()
        );
        Ok(todo)
    }

    /// Removes the todo with `id` and returns it.
    pub fn remove(&mut self, id: TodoId) -> StoreResult<Todo> {
        let Some(position) = self.todos.iter().position(|todo| todo.id == id) else {
            return Err(StoreError::NotFound(id));
        };

        let removed = self.todos.remove(position);
        self.queue_snapshot();
        info!(
            "event=todo_remove module=store status=ok id={} count={}",
            removed.id,
            self.todos.len()
        );
        Ok(removed)
    }

    /// Removes the todo at `index` in display order and returns it.
    ///
    /// # Contract
    /// - An index at or past the end is rejected with
    ///   [`StoreError::InvalidIndex`] and the list is untouched.
    pub fn remove_at(&mut self, index: usize) -> StoreResult<Todo> {
        if index >= self.todos.len() {
            return Err(StoreError::InvalidIndex {
                index,
                len: self.todos.len(),
            });
        }

        let removed = self.todos.remove(index);
        self.queue_snapshot();
        info!(
            "event=todo_remove module=store status=ok id={} index={index} count={}",
            removed.id,
            self.todos.len()
        );
        Ok(removed)
    }

    /// Looks up one todo by id.
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Todos in display order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Waits until every queued save reached storage, or `timeout` elapses.
    ///
    /// Returns `true` when the write queue drained in time.
    pub fn flush(&self, timeout: Duration) -> bool {
        self.persist.flush(timeout)
    }

    fn queue_snapshot(&self) {
        self.persist.submit(self.todos.clone());
    }

    // The returned handle is dropped: removal never cancels a scheduled
    // notification, so there is nothing to redeem it against.
    fn schedule_reminder(&self, todo: &Todo) {
        if let Err(err) = self.scheduler.schedule(NotificationRequest::for_todo(todo)) {
            warn!(
                "event=notify_schedule module=store status=error id={} error={err}",
                todo.id
            );
        }
    }
}
