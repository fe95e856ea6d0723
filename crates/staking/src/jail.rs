// Path: crates/staking/src/jail.rs
//! The boundary between the external jailing subsystem and the changeover kernel.
//!
//! The jailing subsystem appends a removal for each validator it jails. The list is
//! drained on every end-of-block retrieval, and each drained validator is stopped
//! from producing blocks. This module never decides to jail anyone.

use crate::phase_store;
use aeon_api::staking::{BlockProductionTracker, ChangeoverContext, ValidatorLookup};
use aeon_system::PhaseStore;
use aeon_telemetry::changeover_metrics;
use aeon_types::app::{ConsensusPubKey, PublicKey, ValidatorRecord, ValidatorUpdate};
use aeon_types::error::ChangeoverError;

/// Appends a removal for `pub_key` to the pending jailed list.
///
/// A key already pending is not added twice, so the consensus engine never sees
/// duplicate updates for one validator in a block.
pub fn record_jailed(
    ctx: &mut ChangeoverContext<'_>,
    pub_key: PublicKey,
) -> Result<(), ChangeoverError> {
    let mut store = phase_store(ctx);
    let mut pending = store.jailed_updates()?;
    if pending.iter().any(|u| u.pub_key == pub_key) {
        return Ok(());
    }
    pending.push(ValidatorUpdate::removal(pub_key));
    store.set_jailed_updates(&pending)?;
    Ok(())
}

/// Reads the pending jailed list without draining it.
pub fn pending(ctx: &mut ChangeoverContext<'_>) -> Result<Vec<ValidatorUpdate>, ChangeoverError> {
    Ok(phase_store(ctx).jailed_updates()?)
}

/// Reads the pending jailed list and resets it to empty.
pub fn drain(ctx: &mut ChangeoverContext<'_>) -> Result<Vec<ValidatorUpdate>, ChangeoverError> {
    let mut store = phase_store(ctx);
    let updates = store.jailed_updates()?;
    store.set_jailed_updates(&[])?;
    Ok(updates)
}

/// Resolves a jailed validator's record from its wire key.
///
/// Both failure modes mean the jailing subsystem and the staking store disagree,
/// and are fatal.
fn resolve<H>(
    ctx: &ChangeoverContext<'_>,
    hooks: &H,
    update: &ValidatorUpdate,
) -> Result<ValidatorRecord, ChangeoverError>
where
    H: ValidatorLookup + ?Sized,
{
    let key = ConsensusPubKey::try_from(&update.pub_key)?;
    let address = key.address();
    hooks
        .validator_by_consensus_address(ctx, &address)?
        .ok_or(ChangeoverError::ValidatorNotFound(address))
}

/// Drains the jailed list and stops every drained validator from producing
/// blocks. Returns the drained removals unchanged.
pub fn stop_jailed_validators<H>(
    ctx: &mut ChangeoverContext<'_>,
    hooks: &H,
) -> Result<Vec<ValidatorUpdate>, ChangeoverError>
where
    H: ValidatorLookup + BlockProductionTracker + ?Sized,
{
    let updates = drain(ctx)?;
    for update in &updates {
        let validator = resolve(ctx, hooks, update)?;
        hooks.stop_producing_blocks(ctx, &validator)?;
        tracing::info!(
            target: "changeover",
            height = ctx.height(),
            address = %validator.consensus_address,
            operator = %validator.operator,
            "stopped jailed validator from producing blocks"
        );
    }
    if !updates.is_empty() {
        changeover_metrics().inc_jailed_stopped(updates.len() as u64);
    }
    Ok(updates)
}
