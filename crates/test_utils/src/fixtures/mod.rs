//! Deterministic keys and validator updates for reproducible tests.

use aeon_types::app::{
    ConsensusAddress, ConsensusPubKey, PublicKey, ValidatorRecord, ValidatorUpdate,
};

/// A well-formed Ed25519 wire key filled with `seed`.
pub fn ed25519_key(seed: u8) -> PublicKey {
    PublicKey::ed25519(vec![seed; 32])
}

/// An Ed25519 wire key with the wrong length.
pub fn malformed_key(seed: u8) -> PublicKey {
    PublicKey::ed25519(vec![seed; 7])
}

/// A validator update for [`ed25519_key`]`(seed)`.
pub fn update(seed: u8, power: u64) -> ValidatorUpdate {
    ValidatorUpdate::new(ed25519_key(seed), power)
}

/// The consensus address of a well-formed wire key.
///
/// Returns `None` for malformed keys.
pub fn address_of(pk: &PublicKey) -> Option<ConsensusAddress> {
    ConsensusPubKey::try_from(pk).ok().map(|k| k.address())
}

/// A validator record for [`ed25519_key`]`(seed)`.
pub fn record(seed: u8) -> ValidatorRecord {
    let pub_key = ed25519_key(seed);
    ValidatorRecord {
        consensus_address: address_of(&pub_key).unwrap_or_default(),
        operator: format!("valoper-{seed}"),
        pub_key,
    }
}
