// Path: crates/staking/src/gate.rs
//! Maps block height to the changeover phases due in that block.
//!
//! With delay enabled, the DKG committee for the next aeon is computed one block
//! before the aeon starts, so the DKG protocol can begin on schedule. The consensus
//! set is switched to the committee of the finished selection round two blocks
//! before the aeon starts, so every node promotes an already computed result.
//! A height that is never processed misses its window for the current aeon.

use crate::phase_store;
use aeon_api::staking::ChangeoverContext;
use aeon_system::PhaseStore;
use aeon_telemetry::changeover_metrics;
use aeon_types::app::Phase;
use aeon_types::error::ChangeoverError;

/// Blocks before `next_aeon_start` at which the DKG committee is computed.
pub const COMPUTE_DKG_OFFSET: u64 = 1;
/// Blocks before `next_aeon_start` at which the consensus set is promoted.
pub const PROMOTE_OFFSET: u64 = 2;

/// Which phase flags a block raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseTriggers {
    /// The DKG committee for the next aeon is computed this block.
    pub raise_compute_dkg: bool,
    /// The last computed committee is promoted into the consensus set this block.
    pub raise_promote: bool,
}

impl PhaseTriggers {
    /// Returns true if `phase` is raised.
    pub fn raises(&self, phase: Phase) -> bool {
        match phase {
            Phase::ComputeDkg => self.raise_compute_dkg,
            Phase::PromoteConsensus => self.raise_promote,
        }
    }
}

fn at_offset(height: u64, next_aeon_start: u64, offset: u64) -> bool {
    next_aeon_start.checked_sub(offset) == Some(height)
}

/// Evaluates the phase triggers for a block. Pure.
///
/// Without delay both phases are raised on every block.
pub fn evaluate(height: u64, next_aeon_start: u64, delay_enabled: bool) -> PhaseTriggers {
    if !delay_enabled {
        return PhaseTriggers {
            raise_compute_dkg: true,
            raise_promote: true,
        };
    }
    PhaseTriggers {
        raise_compute_dkg: at_offset(height, next_aeon_start, COMPUTE_DKG_OFFSET),
        raise_promote: at_offset(height, next_aeon_start, PROMOTE_OFFSET),
    }
}

/// Begin-block step: evaluates the triggers for the context's header and raises
/// each due phase in the store. Never lowers a flag.
pub fn raise_pending_phases(
    ctx: &mut ChangeoverContext<'_>,
    delay_enabled: bool,
) -> Result<PhaseTriggers, ChangeoverError> {
    let header = ctx.header;
    if delay_enabled && header.blocks_until_aeon().is_none() {
        tracing::warn!(
            target: "changeover",
            height = header.height,
            next_aeon_start = header.next_aeon_start,
            "next aeon start is not ahead of the current height"
        );
    }

    let triggers = evaluate(header.height, header.next_aeon_start, delay_enabled);
    let mut store = phase_store(ctx);
    for phase in Phase::ALL {
        if triggers.raises(phase) {
            store.raise(phase)?;
            changeover_metrics().inc_phase_raised(phase.label());
            tracing::debug!(
                target: "changeover",
                height = header.height,
                phase = phase.label(),
                "phase raised"
            );
        }
    }
    Ok(triggers)
}
