// Path: crates/test_utils/src/mocks.rs
//! Recording implementations of the staking collaborators.

use crate::fixtures::address_of;
use aeon_api::staking::{
    BlockProductionTracker, ChangeoverContext, CommitteeSelector, ConsensusPromoter,
    UnbondingQueue, ValidatorLookup,
};
use aeon_types::app::{ConsensusAddress, PublicKey, ValidatorRecord, ValidatorUpdate};
use aeon_types::error::ChangeoverError;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};

/// One observed collaborator call, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCall {
    /// `select_committee` at `height`.
    SelectCommittee { height: u64 },
    /// `consensus_from_dkg_updates` with a committee of `len` entries.
    Promote { height: u64, len: usize },
    /// `validator_by_consensus_address`.
    Lookup(ConsensusAddress),
    /// `stop_producing_blocks` for the record at this address.
    StopProducing(ConsensusAddress),
    /// `remove_mature_queue_items` at `height`.
    DrainUnbonding { height: u64 },
}

type PromoteFn = Box<dyn Fn(&[ValidatorUpdate]) -> Vec<ValidatorUpdate> + Send + Sync>;

/// A single object implementing every staking collaborator, recording each call.
pub struct MockStakingHooks {
    committee: Mutex<Vec<ValidatorUpdate>>,
    promote: PromoteFn,
    validators: Mutex<BTreeMap<ConsensusAddress, ValidatorRecord>>,
    stopped: Mutex<BTreeSet<ConsensusAddress>>,
    calls: Mutex<Vec<HookCall>>,
    fail_selection: bool,
}

impl Default for MockStakingHooks {
    fn default() -> Self {
        Self {
            committee: Mutex::new(Vec::new()),
            promote: Box::new(|u| u.to_vec()),
            validators: Mutex::new(BTreeMap::new()),
            stopped: Mutex::new(BTreeSet::new()),
            calls: Mutex::new(Vec::new()),
            fail_selection: false,
        }
    }
}

impl MockStakingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the committee returned by every subsequent selection.
    pub fn with_committee(self, committee: Vec<ValidatorUpdate>) -> Self {
        *self.committee.lock() = committee;
        self
    }

    /// Replaces the DKG-to-consensus translation.
    pub fn with_promotion<F>(mut self, f: F) -> Self
    where
        F: Fn(&[ValidatorUpdate]) -> Vec<ValidatorUpdate> + Send + Sync + 'static,
    {
        self.promote = Box::new(f);
        self
    }

    /// Makes committee selection fail.
    pub fn failing_selection(mut self) -> Self {
        self.fail_selection = true;
        self
    }

    /// Registers a validator record under the address derived from its key.
    pub fn with_validator(self, record: ValidatorRecord) -> Self {
        self.validators
            .lock()
            .insert(record.consensus_address, record);
        self
    }

    /// Changes the committee returned by later selections.
    pub fn set_committee(&self, committee: Vec<ValidatorUpdate>) {
        *self.committee.lock() = committee;
    }

    /// Returns true if the validator with this key was stopped from producing blocks.
    pub fn is_stopped(&self, pk: &PublicKey) -> bool {
        address_of(pk).is_some_and(|a| self.stopped.lock().contains(&a))
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: HookCall) {
        self.calls.lock().push(call);
    }
}

impl CommitteeSelector for MockStakingHooks {
    fn select_committee(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<Vec<ValidatorUpdate>, ChangeoverError> {
        self.record(HookCall::SelectCommittee {
            height: ctx.height(),
        });
        if self.fail_selection {
            return Err(ChangeoverError::CommitteeSelection(
                "injected selection failure".into(),
            ));
        }
        Ok(self.committee.lock().clone())
    }
}

impl ConsensusPromoter for MockStakingHooks {
    fn consensus_from_dkg_updates(
        &self,
        ctx: &mut ChangeoverContext<'_>,
        dkg_updates: &[ValidatorUpdate],
    ) -> Result<Vec<ValidatorUpdate>, ChangeoverError> {
        self.record(HookCall::Promote {
            height: ctx.height(),
            len: dkg_updates.len(),
        });
        Ok((self.promote)(dkg_updates))
    }
}

impl ValidatorLookup for MockStakingHooks {
    fn validator_by_consensus_address(
        &self,
        _ctx: &ChangeoverContext<'_>,
        address: &ConsensusAddress,
    ) -> Result<Option<ValidatorRecord>, ChangeoverError> {
        self.record(HookCall::Lookup(*address));
        Ok(self.validators.lock().get(address).cloned())
    }
}

impl BlockProductionTracker for MockStakingHooks {
    fn stop_producing_blocks(
        &self,
        _ctx: &mut ChangeoverContext<'_>,
        validator: &ValidatorRecord,
    ) -> Result<(), ChangeoverError> {
        self.record(HookCall::StopProducing(validator.consensus_address));
        self.stopped.lock().insert(validator.consensus_address);
        Ok(())
    }
}

impl UnbondingQueue for MockStakingHooks {
    fn remove_mature_queue_items(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<(), ChangeoverError> {
        self.record(HookCall::DrainUnbonding {
            height: ctx.height(),
        });
        Ok(())
    }
}
