//! Worker-thread notification delivery.
//!
//! # Responsibility
//! - Queue accepted requests and hold each until its deadline.
//! - Hand due requests to a [`NotificationSink`] in deadline order.
//!
//! # Invariants
//! - Requests whose deadline already passed are delivered promptly.
//! - Dropping the scheduler closes the queue and joins the worker; requests
//!   still pending at shutdown are discarded, not delivered early.

use crate::notify::policy::presentation_policy;
use crate::notify::{
    NotificationRequest, NotificationScheduler, ScheduleError, ScheduleHandle, ScheduleResult,
};
use chrono::Utc;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, info, warn};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Sink a due notification is handed to.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, request: &NotificationRequest);
}

/// Sink that records deliveries in the diagnostic log.
///
/// Stands in for a platform notification surface; emits metadata only.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, request: &NotificationRequest) {
        let policy = presentation_policy();
        info!(
            "event=notify_deliver module=notify status=ok fire_at={} body_chars={} alert={} sound={} badge={}",
            request.fire_at.to_rfc3339(),
            request.body.chars().count(),
            policy.alert,
            policy.sound,
            policy.badge
        );
    }
}

struct PendingNotification {
    request: NotificationRequest,
    handle: ScheduleHandle,
}

impl PartialEq for PendingNotification {
    fn eq(&self, other: &Self) -> bool {
        self.request.fire_at == other.request.fire_at
    }
}

impl Eq for PendingNotification {}

impl PartialOrd for PendingNotification {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingNotification {
    fn cmp(&self, other: &Self) -> Ordering {
        self.request.fire_at.cmp(&other.request.fire_at)
    }
}

/// Scheduler that waits out deadlines on a dedicated thread.
pub struct ThreadScheduler {
    queue: Option<Sender<PendingNotification>>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadScheduler {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        let (queue, requests) = unbounded::<PendingNotification>();
        let worker = std::thread::spawn(move || run_worker(requests, sink));
        Self {
            queue: Some(queue),
            worker: Some(worker),
        }
    }

    /// Convenience constructor delivering through [`LogSink`].
    pub fn with_log_sink() -> Self {
        Self::new(Arc::new(LogSink))
    }
}

impl NotificationScheduler for ThreadScheduler {
    fn schedule(&self, request: NotificationRequest) -> ScheduleResult<ScheduleHandle> {
        let queue = self.queue.as_ref().ok_or(ScheduleError::QueueClosed)?;
        let handle = ScheduleHandle::new();
        let fire_at = request.fire_at;

        queue
            .send(PendingNotification { request, handle })
            .map_err(|_| ScheduleError::QueueClosed)?;

        info!(
            "event=notify_schedule module=notify status=ok handle={handle} fire_at={}",
            fire_at.to_rfc3339()
        );
        Ok(handle)
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        // Closing the queue wakes the worker out of recv, so the join is
        // bounded by one sink delivery.
        self.queue.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("event=notify_shutdown module=notify status=error reason=worker_panic");
            }
        }
    }
}

fn run_worker(requests: Receiver<PendingNotification>, sink: Arc<dyn NotificationSink>) {
    let mut pending: BinaryHeap<Reverse<PendingNotification>> = BinaryHeap::new();

    loop {
        let now = Utc::now();
        while pending
            .peek()
            .is_some_and(|entry| entry.0.request.fire_at <= now)
        {
            if let Some(Reverse(due)) = pending.pop() {
                debug!("event=notify_due module=notify status=ok handle={}", due.handle);
                sink.deliver(&due.request);
            }
        }

        let message = match pending.peek() {
            Some(next) => {
                let wait = (next.0.request.fire_at - Utc::now())
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                match requests.recv_timeout(wait) {
                    Ok(message) => Some(message),
                    // A deadline elapsed; loop around and deliver it.
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => None,
                }
            }
            None => requests.recv().ok(),
        };

        match message {
            Some(entry) => pending.push(Reverse(entry)),
            None => break,
        }
    }

    if !pending.is_empty() {
        info!(
            "event=notify_shutdown module=notify status=ok undelivered={}",
            pending.len()
        );
    }
}
