// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # Aeon Kernel Types
//!
//! This crate is the foundational library for the Aeon changeover kernel, containing
//! the core data structures, error types, and configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `aeon-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This prevents circular
//! dependencies and provides a stable, canonical definition for shared types like
//! `ValidatorUpdate`, `AeonHeader`, and the error enums.

/// Core application-level data structures like `ValidatorUpdate` and `AeonHeader`.
pub mod app;
/// The canonical, deterministic binary codec for consensus-critical state.
pub mod codec;
/// Shared configuration structures (e.g., `ChangeoverConfig`).
pub mod config;
/// A unified set of all error types used across the kernel.
pub mod error;
/// Constants for well-known state keys owned by the changeover kernel.
pub mod keys;
