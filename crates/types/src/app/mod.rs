// Path: crates/types/src/app/mod.rs
//! Core application-level data structures for the changeover kernel.

/// The tagged phase state machine and its single-use consumption ticket.
pub mod changeover;
/// Validator updates, header metadata, and validator records.
pub mod consensus;
/// Wire and internal public keys, and consensus address derivation.
pub mod identity;

pub use changeover::*;
pub use consensus::*;
pub use identity::*;
