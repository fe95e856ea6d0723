// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Aeon Kernel Test Utilities
//!
//! Utilities for testing the changeover kernel components: an in-memory state
//! store, recording staking collaborators, and key/update fixtures.

pub mod assertions;
pub mod fixtures;
pub mod mocks;
pub mod state;
