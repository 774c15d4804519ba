//! Slot value codec shared by every storage backend.
//!
//! # Responsibility
//! - Encode the collection as one JSON array (the slot value).
//! - Decode leniently: a broken document is an empty collection, a broken
//!   entry is dropped, the rest survives.
//!
//! # Invariants
//! - Decode logs positions only, never todo text.

use crate::model::todo::Todo;
use log::warn;

/// Serializes the full collection into the slot value.
pub fn encode_slot(todos: &[Todo]) -> Result<String, serde_json::Error> {
    serde_json::to_string(todos)
}

/// Deserializes a slot value, dropping whatever does not parse.
///
/// Entries written before ids existed (`{text, reminder}`) decode fine; the
/// model mints an id for them. Anything else that fails is logged by
/// position and skipped.
pub fn decode_slot(raw: &str) -> Vec<Todo> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("event=slot_decode module=storage status=error error={err}");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value(entry) {
            Ok(todo) => Some(todo),
            Err(err) => {
                warn!(
                    "event=slot_entry_dropped module=storage status=error position={position} error={err}"
                );
                None
            }
        })
        .collect()
}
