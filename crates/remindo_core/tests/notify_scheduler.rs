use chrono::{Duration as ChronoDuration, Utc};
use crossbeam_channel::{unbounded, Sender};
use remindo_core::{MemoryTodoStorage, NotificationRequest, NotificationSink, ThreadScheduler, TodoStore};
use std::sync::Arc;
use std::time::Duration;

struct ForwardSink {
    delivered: Sender<NotificationRequest>,
}

impl NotificationSink for ForwardSink {
    fn deliver(&self, request: &NotificationRequest) {
        let _ = self.delivered.send(request.clone());
    }
}

#[test]
fn past_reminder_added_to_the_store_is_delivered_promptly() {
    let (tx, rx) = unbounded();
    let scheduler = Arc::new(ThreadScheduler::new(Arc::new(ForwardSink { delivered: tx })));
    let mut store = TodoStore::open(MemoryTodoStorage::new(), scheduler);

    store
        .add("overdue errand", Utc::now() - ChronoDuration::minutes(3))
        .unwrap();

    let delivered = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(delivered.title, "To-Do Reminder");
    assert_eq!(delivered.body, "Don't forget about your to-do: overdue errand");
}

#[test]
fn removing_a_todo_does_not_cancel_its_notification() {
    let (tx, rx) = unbounded();
    let scheduler = Arc::new(ThreadScheduler::new(Arc::new(ForwardSink { delivered: tx })));
    let mut store = TodoStore::open(MemoryTodoStorage::new(), scheduler);

    let added = store
        .add("water plants", Utc::now() + ChronoDuration::milliseconds(400))
        .unwrap();
    store.remove(added.id).unwrap();
    assert!(store.is_empty());

    let delivered = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(delivered.body, "Don't forget about your to-do: water plants");
    assert_eq!(delivered.fire_at, added.reminder);
}
