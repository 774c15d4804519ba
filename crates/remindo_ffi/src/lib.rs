//! Flutter-facing bindings for the Remindo core.

pub mod api;
