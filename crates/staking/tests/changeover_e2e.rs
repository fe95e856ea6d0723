// Path: crates/staking/tests/changeover_e2e.rs
//! Drives the keeper through whole aeons over a committing store, including a
//! node restart between blocks.

use aeon_api::lifecycle::{OnBeginBlock, OnEndBlock};
use aeon_api::staking::ChangeoverContext;
use aeon_staking::{ChangeoverKeeper, EndBlockUpdates};
use aeon_test_utils::assert_halts;
use aeon_test_utils::fixtures::{ed25519_key, record, update};
use aeon_test_utils::mocks::{HookCall, MockStakingHooks};
use aeon_test_utils::state::MemoryState;
use aeon_types::app::{AeonHeader, PhaseState, ValidatorUpdate};
use aeon_types::config::ChangeoverConfig;
use aeon_types::error::ChangeoverError;
use std::sync::Arc;

/// Runs one full block and commits its writes.
fn run_block(
    keeper: &ChangeoverKeeper,
    state: &mut MemoryState,
    height: u64,
    next_aeon_start: u64,
) -> EndBlockUpdates {
    let out = {
        let mut ctx = ChangeoverContext::new(state, AeonHeader::new(height, next_aeon_start));
        keeper.on_begin_block(&mut ctx).unwrap();
        keeper.on_end_block(&mut ctx).unwrap()
    };
    state.commit();
    out
}

fn delayed_keeper(hooks: &Arc<MockStakingHooks>) -> ChangeoverKeeper {
    ChangeoverKeeper::new(ChangeoverConfig::default(), hooks.clone())
}

#[test]
fn full_aeon_cycle_with_restart() {
    aeon_telemetry::init::init_test_tracing();

    let first = vec![update(0xA, 10), update(0xB, 0)];
    let hooks = Arc::new(MockStakingHooks::new().with_committee(first.clone()));
    let mut keeper = delayed_keeper(&hooks);
    let mut state = MemoryState::new();

    assert_eq!(run_block(&keeper, &mut state, 996, 1000), EndBlockUpdates::default());
    assert_eq!(run_block(&keeper, &mut state, 997, 1000), EndBlockUpdates::default());

    // Promotion window before any committee has been computed.
    let out = run_block(&keeper, &mut state, 998, 1000);
    assert!(out.consensus.is_empty());
    assert!(hooks.calls().contains(&HookCall::Promote { height: 998, len: 0 }));

    // The node restarts between blocks; only committed state survives.
    state = state.reopen();
    keeper = delayed_keeper(&hooks);

    let out = run_block(&keeper, &mut state, 999, 1000);
    assert_eq!(out.dkg, first);
    assert!(out.consensus.is_empty());

    assert_eq!(run_block(&keeper, &mut state, 1000, 2000), EndBlockUpdates::default());

    // Next aeon: the committee computed at 999 is promoted at 1998.
    let second = vec![update(0xC, 7)];
    hooks.set_committee(second.clone());
    let out = run_block(&keeper, &mut state, 1998, 2000);
    assert_eq!(out.consensus, first);
    assert!(out.dkg.is_empty());

    let out = run_block(&keeper, &mut state, 1999, 2000);
    assert_eq!(out.dkg, second);

    let selections = hooks
        .calls()
        .iter()
        .filter(|c| matches!(c, HookCall::SelectCommittee { .. }))
        .count();
    assert_eq!(selections, 2);
}

#[test]
fn aborted_block_does_not_consume_phase() {
    let committee = vec![update(1, 5)];
    let hooks = Arc::new(MockStakingHooks::new().with_committee(committee.clone()));
    let keeper = delayed_keeper(&hooks);
    let mut state = MemoryState::new();

    {
        let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(999, 1000));
        keeper.begin_block(&mut ctx).unwrap();
        keeper.end_block(&mut ctx).unwrap();
    }
    state.rollback();
    let mut state = state.reopen();

    let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(999, 1000));
    assert_eq!(
        keeper.snapshot(&mut ctx).unwrap().compute_dkg,
        PhaseState::Idle
    );
    keeper.begin_block(&mut ctx).unwrap();
    assert_eq!(keeper.end_block(&mut ctx).unwrap().dkg, committee);
}

#[test]
fn jailed_validators_leave_on_ordinary_blocks() {
    let hooks = Arc::new(
        MockStakingHooks::new()
            .with_validator(record(0xC))
            .with_validator(record(0xD)),
    );
    let keeper = delayed_keeper(&hooks);
    let mut state = MemoryState::new();

    {
        let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(500, 1000));
        keeper.record_jailed(&mut ctx, ed25519_key(0xC)).unwrap();
    }
    state.commit();
    let mut state = state.reopen();

    let out = run_block(&keeper, &mut state, 500, 1000);
    assert_eq!(out.consensus, vec![ValidatorUpdate::removal(ed25519_key(0xC))]);
    assert!(hooks.is_stopped(&ed25519_key(0xC)));
    assert!(!hooks.is_stopped(&ed25519_key(0xD)));

    assert_eq!(run_block(&keeper, &mut state, 501, 1000), EndBlockUpdates::default());
}

#[test]
fn unknown_jailed_validator_halts_the_block() {
    let hooks = Arc::new(MockStakingHooks::new());
    let keeper = delayed_keeper(&hooks);
    let mut state = MemoryState::new();
    let mut ctx = ChangeoverContext::new(&mut state, AeonHeader::new(500, 1000));
    keeper.record_jailed(&mut ctx, ed25519_key(0xE)).unwrap();

    keeper.on_begin_block(&mut ctx).unwrap();
    assert_halts!(
        keeper.on_end_block(&mut ctx),
        ChangeoverError::ValidatorNotFound(_)
    );
}

#[test]
fn eager_mode_changes_over_every_block() {
    let hooks = Arc::new(MockStakingHooks::new().with_committee(vec![update(1, 1)]));
    let keeper = ChangeoverKeeper::new(ChangeoverConfig::eager(), hooks.clone());
    let mut state = MemoryState::new();

    for height in 1..=3u64 {
        let committee = vec![update(height as u8, height)];
        hooks.set_committee(committee.clone());
        let out = run_block(&keeper, &mut state, height, 1000);
        assert_eq!(out.dkg, committee);
        assert_eq!(out.consensus, committee);
    }
}
