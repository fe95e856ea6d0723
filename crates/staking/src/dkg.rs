// Path: crates/staking/src/dkg.rs
//! Computes the next DKG committee when its phase is pending.

use crate::phase_store;
use aeon_api::staking::{ChangeoverContext, CommitteeSelector};
use aeon_system::PhaseStore;
use aeon_telemetry::changeover_metrics;
use aeon_types::app::{Phase, PhaseTicket, ValidatorUpdate};
use aeon_types::error::ChangeoverError;

/// Persists a freshly computed committee. Requires the compute ticket, so a
/// committee is only ever stored for a consumed compute phase.
fn store_committee(
    ctx: &mut ChangeoverContext<'_>,
    ticket: PhaseTicket,
    updates: &[ValidatorUpdate],
) -> Result<(), ChangeoverError> {
    debug_assert_eq!(ticket.phase(), Phase::ComputeDkg);
    phase_store(ctx).set_committee_updates(updates)?;
    Ok(())
}

/// Returns the DKG committee updates for this block.
///
/// Empty unless the compute phase is pending. When it is, the phase is consumed,
/// the selector runs, and its result is stored (replacing any earlier committee)
/// and returned for the DKG subsystem's own, undelayed changeover.
///
/// Must run before the unbonding queue is drained for the same block, so that
/// selection sees validators' pre-maturity bonding state.
pub fn compute_dkg_updates<H>(
    ctx: &mut ChangeoverContext<'_>,
    selector: &H,
) -> Result<Vec<ValidatorUpdate>, ChangeoverError>
where
    H: CommitteeSelector + ?Sized,
{
    let Some(ticket) = phase_store(ctx).consume(Phase::ComputeDkg)? else {
        return Ok(Vec::new());
    };

    let updates = selector.select_committee(ctx)?;
    store_committee(ctx, ticket, &updates)?;

    changeover_metrics().observe_committee_computed(updates.len());
    tracing::info!(
        target: "changeover",
        height = ctx.height(),
        next_aeon_start = ctx.header.next_aeon_start,
        size = updates.len(),
        "computed DKG committee"
    );
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_test_utils::fixtures::update;
    use aeon_test_utils::mocks::{HookCall, MockStakingHooks};
    use aeon_test_utils::state::MemoryState;
    use aeon_types::app::{AeonHeader, PhaseState};

    #[test]
    fn idle_phase_is_a_noop() {
        let hooks = MockStakingHooks::new().with_committee(vec![update(1, 10)]);
        let mut state = MemoryState::new();
        let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(5, 1000));

        assert!(compute_dkg_updates(&mut ctx, &hooks).unwrap().is_empty());
        assert!(hooks.calls().is_empty());
        assert!(phase_store(&mut ctx).committee_updates().unwrap().is_empty());
    }

    #[test]
    fn pending_phase_computes_persists_and_clears() {
        let committee = vec![update(0xA, 10), update(0xB, 0)];
        let hooks = MockStakingHooks::new().with_committee(committee.clone());
        let mut state = MemoryState::new();
        let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(999, 1000));
        phase_store(&mut ctx).raise(Phase::ComputeDkg).unwrap();

        let out = compute_dkg_updates(&mut ctx, &hooks).unwrap();
        assert_eq!(out, committee);

        let store = phase_store(&mut ctx);
        assert_eq!(store.committee_updates().unwrap(), committee);
        assert_eq!(
            store.phase_state(Phase::ComputeDkg).unwrap(),
            PhaseState::Idle
        );
        assert_eq!(hooks.calls(), vec![HookCall::SelectCommittee { height: 999 }]);
    }

    #[test]
    fn second_call_in_same_block_does_not_recompute() {
        let hooks = MockStakingHooks::new().with_committee(vec![update(1, 1)]);
        let mut state = MemoryState::new();
        let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(999, 1000));
        phase_store(&mut ctx).raise(Phase::ComputeDkg).unwrap();

        compute_dkg_updates(&mut ctx, &hooks).unwrap();
        assert!(compute_dkg_updates(&mut ctx, &hooks).unwrap().is_empty());
        assert_eq!(hooks.calls().len(), 1);
    }

    #[test]
    fn empty_committee_is_still_persisted() {
        let hooks = MockStakingHooks::new();
        let mut state = MemoryState::new();
        let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(999, 1000));
        phase_store(&mut ctx)
            .set_committee_updates(&[update(7, 70)])
            .unwrap();
        phase_store(&mut ctx).raise(Phase::ComputeDkg).unwrap();

        assert!(compute_dkg_updates(&mut ctx, &hooks).unwrap().is_empty());
        assert!(phase_store(&mut ctx).committee_updates().unwrap().is_empty());
    }

    #[test]
    fn selection_failure_propagates() {
        let hooks = MockStakingHooks::new().failing_selection();
        let mut state = MemoryState::new();
        let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(999, 1000));
        phase_store(&mut ctx).raise(Phase::ComputeDkg).unwrap();

        assert!(matches!(
            compute_dkg_updates(&mut ctx, &hooks),
            Err(ChangeoverError::CommitteeSelection(_))
        ));
    }
}
