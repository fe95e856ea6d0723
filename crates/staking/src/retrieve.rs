// Path: crates/staking/src/retrieve.rs
//! Produces the consensus validator updates at the end of every block.

use crate::jail::stop_jailed_validators;
use crate::phase_store;
use aeon_api::staking::{
    BlockProductionTracker, ChangeoverContext, ConsensusPromoter, UnbondingQueue, ValidatorLookup,
};
use aeon_system::PhaseStore;
use aeon_telemetry::{changeover_metrics, time::Timer};
use aeon_types::app::{Phase, PhaseTicket, ValidatorUpdate};
use aeon_types::error::ChangeoverError;

/// Translates the stored DKG committee into consensus updates. Requires the
/// promote ticket. The stored committee is left in place.
fn promote<H>(
    ctx: &mut ChangeoverContext<'_>,
    hooks: &H,
    ticket: PhaseTicket,
) -> Result<Vec<ValidatorUpdate>, ChangeoverError>
where
    H: ConsensusPromoter + ?Sized,
{
    debug_assert_eq!(ticket.phase(), Phase::PromoteConsensus);
    let dkg_updates = phase_store(ctx).committee_updates()?;
    let updates = hooks.consensus_from_dkg_updates(ctx, &dkg_updates)?;

    changeover_metrics().inc_committee_promoted();
    tracing::info!(
        target: "changeover",
        height = ctx.height(),
        committee = dkg_updates.len(),
        updates = updates.len(),
        "promoted DKG committee into consensus set"
    );
    Ok(updates)
}

/// Returns the consensus validator updates for this block.
///
/// Jailed validators are always drained and stopped from producing blocks. If the
/// promote phase is pending, the promoted committee replaces the jailed removals
/// as the result; otherwise the jailed removals are returned, so ordinary blocks
/// only ever remove validators. The unbonding queue is drained last, after the
/// result is fixed.
pub fn retrieve_validator_updates<H>(
    ctx: &mut ChangeoverContext<'_>,
    hooks: &H,
) -> Result<Vec<ValidatorUpdate>, ChangeoverError>
where
    H: ValidatorLookup + BlockProductionTracker + ConsensusPromoter + UnbondingQueue + ?Sized,
{
    let _timer = Timer::new(changeover_metrics());

    let jailed = stop_jailed_validators(ctx, hooks)?;
    let ticket = phase_store(ctx).consume(Phase::PromoteConsensus)?;
    let updates = match ticket {
        Some(ticket) => promote(ctx, hooks, ticket)?,
        None => jailed,
    };

    hooks.remove_mature_queue_items(ctx)?;
    Ok(updates)
}
