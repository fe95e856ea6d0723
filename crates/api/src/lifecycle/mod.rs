// Path: crates/api/src/lifecycle/mod.rs
//! Defines traits for components that hook into the block processing lifecycle.
//!
//! Both hooks run inline in the host's sequential block pipeline. An `Err` aborts
//! the block; the host must not commit any of the block's writes.

use crate::staking::ChangeoverContext;
use aeon_types::error::ChangeoverError;

/// A trait for components that need to act before a block's transactions run.
pub trait OnBeginBlock: Send + Sync {
    /// Called once at the start of every block.
    fn on_begin_block(&self, ctx: &mut ChangeoverContext<'_>) -> Result<(), ChangeoverError>;
}

/// A trait for components that need to act after a block's transactions ran.
pub trait OnEndBlock: Send + Sync {
    /// The value handed back to the host at the end of the block.
    type Output;

    /// Called once at the end of every block.
    fn on_end_block(&self, ctx: &mut ChangeoverContext<'_>)
        -> Result<Self::Output, ChangeoverError>;
}
