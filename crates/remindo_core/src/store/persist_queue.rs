//! Serialized write-behind persistence.
//!
//! # Responsibility
//! - Apply snapshot saves on one worker thread in submission order.
//! - Absorb storage failures so mutations never block or fail on disk.
//!
//! # Invariants
//! - Saves are applied in the order they were submitted.
//! - `flush` returns only after every earlier submission was applied.
//! - A failed save is logged and dropped; later saves still run.
//! - Dropping the queue drains already-submitted saves before the worker
//!   exits.

use crate::model::todo::Todo;
use crate::storage::TodoStorage;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::warn;
use std::thread::JoinHandle;
use std::time::Duration;

enum QueueMessage {
    Save(Vec<Todo>),
    Flush(Sender<()>),
}

/// Single-writer queue that owns the storage backend.
pub struct PersistQueue {
    queue: Option<Sender<QueueMessage>>,
    worker: Option<JoinHandle<()>>,
}

impl PersistQueue {
    /// Spawns the worker thread that owns `storage` and applies saves to it.
    pub fn spawn(storage: impl TodoStorage + Send + 'static) -> Self {
        let (queue, messages) = unbounded::<QueueMessage>();
        let worker = std::thread::spawn(move || run_worker(messages, storage));
        Self {
            queue: Some(queue),
            worker: Some(worker),
        }
    }

    /// Queues one snapshot save. Never blocks on storage.
    pub fn submit(&self, todos: Vec<Todo>) {
        let Some(queue) = self.queue.as_ref() else {
            return;
        };
        if queue.send(QueueMessage::Save(todos)).is_err() {
            warn!("event=persist_submit module=store status=error reason=queue_closed");
        }
    }

    /// Blocks until every earlier submission was applied, or `timeout`
    /// elapses.
    ///
    /// Returns `true` when the queue drained in time.
    pub fn flush(&self, timeout: Duration) -> bool {
        let Some(queue) = self.queue.as_ref() else {
            return false;
        };
        let (ack, drained) = bounded::<()>(1);
        if queue.send(QueueMessage::Flush(ack)).is_err() {
            return false;
        }
        drained.recv_timeout(timeout).is_ok()
    }
}

impl Drop for PersistQueue {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain buffered saves and exit.
        self.queue.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("event=persist_shutdown module=store status=error reason=worker_panic");
            }
        }
    }
}

fn run_worker(messages: Receiver<QueueMessage>, mut storage: impl TodoStorage) {
    while let Ok(message) = messages.recv() {
        match message {
            QueueMessage::Save(todos) => {
                if let Err(err) = storage.save(&todos) {
                    warn!(
                        "event=persist_save module=store status=error count={} error={err}",
                        todos.len()
                    );
                }
            }
            QueueMessage::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
