// Path: crates/api/src/lib.rs

//! # Aeon Kernel API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Aeon Kernel API
//!
//! Core traits and interfaces for the Aeon changeover kernel. This crate defines
//! the stable contract between the changeover logic and the runtime that hosts it:
//! the key-value store, the per-block context, and the staking collaborators.

/// Defines traits for components that hook into the block processing lifecycle.
pub mod lifecycle;
/// The per-block `ChangeoverContext` and the staking collaborator traits.
pub mod staking;
/// Core trait for key-value state access.
pub mod state;

