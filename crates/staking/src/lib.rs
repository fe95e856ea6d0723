// Path: crates/staking/src/lib.rs
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
//! Validator-set changeover sequencing for the Aeon kernel.
//!
//! Two changeovers run on independent clocks: the DKG committee that produces
//! randomness, and the consensus validator set that produces blocks. This crate
//! decides from block height alone when to compute the next DKG committee, when
//! to promote it into the consensus set, and surfaces jailed validators for removal
//! in between. Every node must reach the same decision at every height, so all
//! state lives in the block's store and every failure halts the block.
//!
//! Per block, the host runs, in this order:
//! 1. [`gate::raise_pending_phases`] (begin block)
//! 2. [`dkg::compute_dkg_updates`]
//! 3. [`retrieve::retrieve_validator_updates`], which drains the unbonding queue last
//!
//! [`ChangeoverKeeper`] bundles these behind the lifecycle hooks.

pub mod dkg;
pub mod gate;
pub mod jail;
pub mod keeper;
pub mod retrieve;

use aeon_api::staking::ChangeoverContext;
use aeon_system::KvPhaseStore;

pub use gate::{evaluate, PhaseTriggers};
pub use keeper::{ChangeoverKeeper, EndBlockUpdates};

/// Opens the phase store over the context's state for the duration of a borrow.
pub(crate) fn phase_store<'b>(ctx: &'b mut ChangeoverContext<'_>) -> KvPhaseStore<'b> {
    KvPhaseStore::new(&mut *ctx.state)
}
