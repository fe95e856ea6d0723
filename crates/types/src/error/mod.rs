// Path: crates/types/src/error/mod.rs
//! Core error types for the Aeon changeover kernel.
//!
//! The changeover kernel has no recoverable error path. Any `ChangeoverError`
//! returned from a block hook means the block must be aborted and the node halted,
//! since continuing on a node-local failure would diverge from the rest of the network.

use crate::app::{ConsensusAddress, PhaseState};
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors related to the state store or the codec used to persist values in it.
#[derive(Error, Debug)]
pub enum StateError {
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// The provided value was invalid.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// An error occurred during state deserialization.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::InvalidValue(_) => "STATE_INVALID_VALUE",
            Self::Decode(_) => "STATE_DECODE_ERROR",
        }
    }
}

/// Fatal conditions raised while sequencing a validator-set changeover.
#[derive(Error, Debug)]
pub enum ChangeoverError {
    /// An error occurred while accessing the state.
    #[error("State access error: {0}")]
    State(#[from] StateError),
    /// A jailed validator's public key could not be converted to a consensus key.
    #[error("Error converting public key in validator updates: {0}")]
    MalformedPublicKey(String),
    /// A jailed validator's consensus address did not resolve to a validator record.
    #[error("Validator with consensus address {0} not found")]
    ValidatorNotFound(ConsensusAddress),
    /// A phase slot held the pending state of a different phase.
    #[error("Phase slot '{phase}' holds foreign state {found:?}")]
    CorruptPhase {
        /// The phase whose slot was read.
        phase: &'static str,
        /// The state found in the slot.
        found: PhaseState,
    },
    /// The committee-selection algorithm failed.
    #[error("Committee selection failed: {0}")]
    CommitteeSelection(String),
    /// Translating DKG committee updates into consensus updates failed.
    #[error("Promotion of DKG committee failed: {0}")]
    Promotion(String),
    /// The block-production eligibility tracker rejected a request.
    #[error("Block production tracker error: {0}")]
    BlockProduction(String),
    /// Draining the unbonding-maturity queue failed.
    #[error("Unbonding queue error: {0}")]
    UnbondingQueue(String),
}

impl ErrorCode for ChangeoverError {
    fn code(&self) -> &'static str {
        match self {
            Self::State(_) => "CHANGEOVER_STATE_ERROR",
            Self::MalformedPublicKey(_) => "CHANGEOVER_MALFORMED_PUBKEY",
            Self::ValidatorNotFound(_) => "CHANGEOVER_VALIDATOR_NOT_FOUND",
            Self::CorruptPhase { .. } => "CHANGEOVER_CORRUPT_PHASE",
            Self::CommitteeSelection(_) => "CHANGEOVER_COMMITTEE_SELECTION_FAILED",
            Self::Promotion(_) => "CHANGEOVER_PROMOTION_FAILED",
            Self::BlockProduction(_) => "CHANGEOVER_BLOCK_PRODUCTION_ERROR",
            Self::UnbondingQueue(_) => "CHANGEOVER_UNBONDING_QUEUE_ERROR",
        }
    }
}
