// Path: crates/types/src/app/consensus.rs

use crate::app::{ConsensusAddress, PublicKey};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A change to the voting power of a single validator.
///
/// A `power` of zero denotes removal of the validator from the active set.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Hash)]
pub struct ValidatorUpdate {
    /// The validator's consensus key, in wire format.
    pub pub_key: PublicKey,
    /// The new voting power. Zero removes the validator.
    pub power: u64,
}

impl ValidatorUpdate {
    /// Creates a new update.
    pub fn new(pub_key: PublicKey, power: u64) -> Self {
        Self { pub_key, power }
    }

    /// Creates a removal (power zero) for the given key.
    pub fn removal(pub_key: PublicKey) -> Self {
        Self::new(pub_key, 0)
    }
}

/// The subset of block header metadata consumed by the changeover kernel.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AeonHeader {
    /// The height of the block being processed.
    pub height: u64,
    /// The height at which the next DKG aeon begins. Constant within an aeon and
    /// strictly greater than `height`.
    pub next_aeon_start: u64,
}

impl AeonHeader {
    /// Creates header metadata for a block.
    pub fn new(height: u64, next_aeon_start: u64) -> Self {
        Self {
            height,
            next_aeon_start,
        }
    }

    /// Number of blocks until the next aeon begins, or `None` if the header is
    /// already at or past it.
    pub fn blocks_until_aeon(&self) -> Option<u64> {
        self.next_aeon_start
            .checked_sub(self.height)
            .filter(|d| *d > 0)
    }
}

/// A validator record as resolved by the staking store from a consensus address.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ValidatorRecord {
    /// The address the record was resolved from.
    pub consensus_address: ConsensusAddress,
    /// The operator's human-readable identifier, as stored by the staking module.
    pub operator: String,
    /// The validator's consensus key.
    pub pub_key: PublicKey,
}
