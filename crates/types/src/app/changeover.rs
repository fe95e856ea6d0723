// Path: crates/types/src/app/changeover.rs

//! The explicit state machine behind the changeover phase flags.
//!
//! Each phase owns one durable slot holding a [`PhaseState`]. The only way to move a
//! slot out of its pending state is [`PhaseState::consume`], which hands out a
//! [`PhaseTicket`] exactly once. Work gated on a phase requires the ticket, so a
//! pending phase cannot be acted upon twice.

use crate::error::ChangeoverError;
use crate::keys::{COMPUTE_DKG_PHASE_KEY, PROMOTE_CONSENSUS_PHASE_KEY};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The two independently-flagged phases of a validator-set changeover.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Compute the candidate DKG committee for the next aeon.
    ComputeDkg,
    /// Promote the last computed DKG committee into the consensus validator set.
    PromoteConsensus,
}

impl Phase {
    /// Every phase, in block-processing order.
    pub const ALL: [Phase; 2] = [Phase::ComputeDkg, Phase::PromoteConsensus];

    /// The state key of this phase's slot.
    pub fn key(&self) -> &'static [u8] {
        match self {
            Phase::ComputeDkg => COMPUTE_DKG_PHASE_KEY,
            Phase::PromoteConsensus => PROMOTE_CONSENSUS_PHASE_KEY,
        }
    }

    /// The state a raised slot of this phase holds.
    pub fn pending_state(&self) -> PhaseState {
        match self {
            Phase::ComputeDkg => PhaseState::PendingCompute,
            Phase::PromoteConsensus => PhaseState::PendingPromote,
        }
    }

    /// A stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::ComputeDkg => "compute_dkg",
            Phase::PromoteConsensus => "promote_consensus",
        }
    }
}

/// The tagged state stored in a phase slot. An absent slot reads as `Idle`.
#[derive(
    Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize,
)]
pub enum PhaseState {
    /// Nothing pending.
    #[default]
    #[codec(index = 0)]
    Idle,
    /// A DKG committee computation is due this block.
    #[codec(index = 1)]
    PendingCompute,
    /// A consensus promotion is due this block.
    #[codec(index = 2)]
    PendingPromote,
}

impl PhaseState {
    /// Transition for raising `phase`. Raising an already pending slot is a no-op.
    pub fn raise(self, phase: Phase) -> Result<PhaseState, ChangeoverError> {
        match self {
            PhaseState::Idle => Ok(phase.pending_state()),
            s if s == phase.pending_state() => Ok(s),
            other => Err(ChangeoverError::CorruptPhase {
                phase: phase.label(),
                found: other,
            }),
        }
    }

    /// Transition for consuming `phase`. Returns the next slot state and, when the
    /// slot was pending, the single ticket for acting on it.
    pub fn consume(
        self,
        phase: Phase,
    ) -> Result<(PhaseState, Option<PhaseTicket>), ChangeoverError> {
        match self {
            PhaseState::Idle => Ok((PhaseState::Idle, None)),
            s if s == phase.pending_state() => {
                Ok((PhaseState::Idle, Some(PhaseTicket { phase })))
            }
            other => Err(ChangeoverError::CorruptPhase {
                phase: phase.label(),
                found: other,
            }),
        }
    }
}

/// Proof that a pending phase was consumed. It cannot be cloned or constructed
/// outside [`PhaseState::consume`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a consumed phase must be acted upon"]
pub struct PhaseTicket {
    phase: Phase,
}

impl PhaseTicket {
    /// The phase this ticket was issued for.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// A read-only view of every slot owned by the changeover kernel.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    /// State of the DKG compute slot.
    pub compute_dkg: PhaseState,
    /// State of the consensus promotion slot.
    pub promote_consensus: PhaseState,
    /// Number of entries in the persisted DKG committee payload.
    pub committee_updates: usize,
    /// Number of jailed validators waiting to be drained.
    pub jailed_pending: usize,
}
