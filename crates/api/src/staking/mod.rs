// Path: crates/api/src/staking/mod.rs

//! Defines the per-block context and the staking collaborators the changeover
//! kernel sequences.
//!
//! The kernel never implements committee election, unbonding, or block-production
//! eligibility itself. It calls out to these traits at fixed points of a block and
//! relies on them being synchronous and deterministic.

use crate::state::StateAccess;
use aeon_types::app::{AeonHeader, ConsensusAddress, ValidatorRecord, ValidatorUpdate};
use aeon_types::error::ChangeoverError;

/// The explicit context for one block-processing session.
///
/// It is constructed once per block by the host and passed to every changeover
/// operation, so no operation reaches for shared global state.
pub struct ChangeoverContext<'a> {
    /// The host's state store for this block.
    pub state: &'a mut dyn StateAccess,
    /// Header metadata of the block being processed.
    pub header: AeonHeader,
}

impl<'a> ChangeoverContext<'a> {
    /// Creates a new context over the block's state.
    pub fn new(state: &'a mut dyn StateAccess, header: AeonHeader) -> Self {
        Self { state, header }
    }

    /// The height of the block being processed.
    pub fn height(&self) -> u64 {
        self.header.height
    }
}

/// The committee-selection algorithm that produces the next DKG committee.
pub trait CommitteeSelector: Send + Sync {
    /// Applies pending staking changes and returns the resulting committee updates.
    ///
    /// Must be total and complete within the block.
    fn select_committee(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<Vec<ValidatorUpdate>, ChangeoverError>;
}

/// Translates a finished DKG committee into consensus validator-set updates.
pub trait ConsensusPromoter: Send + Sync {
    /// Returns the consensus updates that make the active set match `dkg_updates`.
    fn consensus_from_dkg_updates(
        &self,
        ctx: &mut ChangeoverContext<'_>,
        dkg_updates: &[ValidatorUpdate],
    ) -> Result<Vec<ValidatorUpdate>, ChangeoverError>;
}

/// Resolves validator records from derived consensus addresses.
pub trait ValidatorLookup: Send + Sync {
    /// Returns the record for `address`, or `None` if no validator has that address.
    fn validator_by_consensus_address(
        &self,
        ctx: &ChangeoverContext<'_>,
        address: &ConsensusAddress,
    ) -> Result<Option<ValidatorRecord>, ChangeoverError>;
}

/// Controls which validators may produce blocks.
pub trait BlockProductionTracker: Send + Sync {
    /// Stops `validator` from producing blocks. Idempotent.
    fn stop_producing_blocks(
        &self,
        ctx: &mut ChangeoverContext<'_>,
        validator: &ValidatorRecord,
    ) -> Result<(), ChangeoverError>;
}

/// The queue of unbonding entries awaiting maturity.
pub trait UnbondingQueue: Send + Sync {
    /// Finalizes every entry matured as of the context's block.
    fn remove_mature_queue_items(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<(), ChangeoverError>;
}

/// The full set of staking collaborators required by the changeover kernel.
pub trait StakingHooks:
    CommitteeSelector
    + ConsensusPromoter
    + ValidatorLookup
    + BlockProductionTracker
    + UnbondingQueue
{
}

impl<T> StakingHooks for T where
    T: CommitteeSelector
        + ConsensusPromoter
        + ValidatorLookup
        + BlockProductionTracker
        + UnbondingQueue
{
}
