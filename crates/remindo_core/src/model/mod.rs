//! Domain model for the to-do collection.
//!
//! # Responsibility
//! - Define the canonical record shared by store, storage and FFI layers.
//! - Enforce creation-time invariants (non-empty text, non-nil id).
//!
//! # Invariants
//! - Every todo carries a stable `TodoId` that is never reused.
//! - A todo's reminder instant is fixed at creation and never recomputed.

pub mod todo;
