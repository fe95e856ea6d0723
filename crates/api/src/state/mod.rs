// Path: crates/api/src/state/mod.rs
//! Core trait for state management.
//!
//! The changeover kernel only needs plain key-value access; the durable store
//! behind it, its versioning, and its commit boundary belong to the host runtime.

mod accessor;

pub use accessor::*;
