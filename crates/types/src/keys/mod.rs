// Path: crates/types/src/keys/mod.rs
//! Defines constants for the well-known state keys owned by the changeover kernel.
//!
//! These keys are exclusively owned by the changeover kernel; no other component
//! reads or writes them. They must never change once a chain is live, since
//! payloads written before a restart are read back under the same key.

/// The state key prefix shared by every changeover slot.
pub const CHANGEOVER_KEY_PREFIX: &[u8] = b"staking::changeover::";

/// The phase slot for a pending DKG committee computation.
pub const COMPUTE_DKG_PHASE_KEY: &[u8] = b"staking::changeover::compute_dkg";

/// The phase slot for a pending consensus promotion.
pub const PROMOTE_CONSENSUS_PHASE_KEY: &[u8] = b"staking::changeover::promote_consensus";

/// The last computed DKG committee, stored as a SCALE `Vec<ValidatorUpdate>`.
/// Last write wins; never cleared on read.
pub const COMMITTEE_UPDATES_KEY: &[u8] = b"staking::changeover::committee_updates";

/// Validators jailed since the last retrieval, stored as a SCALE `Vec<ValidatorUpdate>`.
pub const JAILED_UPDATES_KEY: &[u8] = b"staking::changeover::jailed_updates";

/// Every key owned by the changeover kernel.
pub const ALL_CHANGEOVER_KEYS: [&[u8]; 4] = [
    COMPUTE_DKG_PHASE_KEY,
    PROMOTE_CONSENSUS_PHASE_KEY,
    COMMITTEE_UPDATES_KEY,
    JAILED_UPDATES_KEY,
];
