//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `remindo_core` linkage.
//! - Keep default output deterministic for quick local sanity checks.

use chrono::{Duration, Utc};
use remindo_core::{format_reminder, has_passed, MemoryTodoStorage, ThreadScheduler, TodoStore};
use std::sync::Arc;

fn main() {
    println!("remindo_core ping={}", remindo_core::ping());
    println!("remindo_core version={}", remindo_core::core_version());

    if std::env::args().any(|arg| arg == "demo") {
        run_demo();
    }
}

/// Walks the add/list/remove lifecycle against in-memory storage.
fn run_demo() {
    let scheduler = Arc::new(ThreadScheduler::with_log_sink());
    let mut store = TodoStore::open(MemoryTodoStorage::new(), scheduler);

    let errand = match store.add("buy milk", Utc::now() + Duration::minutes(30)) {
        Ok(todo) => todo,
        Err(err) => {
            eprintln!("demo add failed: {err}");
            return;
        }
    };
    if let Err(err) = store.add("call dentist", Utc::now() + Duration::hours(2)) {
        eprintln!("demo add failed: {err}");
        return;
    }

    for (position, todo) in store.todos().iter().enumerate() {
        println!(
            "demo todo[{position}] text={} reminder={} passed={}",
            todo.text,
            format_reminder(&todo.reminder),
            has_passed(&todo.reminder)
        );
    }

    match store.remove(errand.id) {
        Ok(removed) => println!("demo removed={}", removed.text),
        Err(err) => eprintln!("demo remove failed: {err}"),
    }
    println!("demo remaining={}", store.len());
    println!(
        "demo flushed={}",
        store.flush(std::time::Duration::from_secs(5))
    );
}
