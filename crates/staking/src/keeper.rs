// Path: crates/staking/src/keeper.rs
//! The host-facing entry point that runs the changeover steps in block order.

use crate::{dkg, gate, jail, phase_store, retrieve, PhaseTriggers};
use aeon_api::lifecycle::{OnBeginBlock, OnEndBlock};
use aeon_api::staking::{ChangeoverContext, StakingHooks};
use aeon_system::PhaseStore;
use aeon_telemetry::error_metrics;
use aeon_telemetry::sinks::ErrorMetricsSink;
use aeon_types::app::{PhaseSnapshot, PublicKey, ValidatorUpdate};
use aeon_types::config::ChangeoverConfig;
use aeon_types::error::{ChangeoverError, ErrorCode};
use std::sync::Arc;

/// The updates handed back to the host at the end of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndBlockUpdates {
    /// The freshly computed DKG committee, for the DKG subsystem. Empty unless
    /// the compute phase was due.
    pub dkg: Vec<ValidatorUpdate>,
    /// The consensus validator-set updates for this block.
    pub consensus: Vec<ValidatorUpdate>,
}

/// Sequences the DKG and consensus validator-set changeovers for a node.
///
/// The keeper holds no per-block state. Everything it remembers between blocks
/// lives in the context's store, so a restarted node resumes exactly where the
/// last committed block left off.
pub struct ChangeoverKeeper {
    config: ChangeoverConfig,
    hooks: Arc<dyn StakingHooks>,
    error_sink: Option<&'static dyn ErrorMetricsSink>,
}

impl ChangeoverKeeper {
    /// Creates a keeper over the node's staking collaborators.
    pub fn new(config: ChangeoverConfig, hooks: Arc<dyn StakingHooks>) -> Self {
        Self {
            config,
            hooks,
            error_sink: None,
        }
    }

    /// Reports errors to `sink` instead of the process-wide error sink.
    pub fn with_error_metrics(mut self, sink: &'static dyn ErrorMetricsSink) -> Self {
        self.error_sink = Some(sink);
        self
    }

    /// Raises the phases due at the context's height.
    pub fn begin_block(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<PhaseTriggers, ChangeoverError> {
        let res = gate::raise_pending_phases(ctx, self.config.delay_validator_updates);
        self.halt_on_error("begin_block", ctx, res)
    }

    /// Computes the DKG committee if its phase is pending.
    pub fn dkg_validator_updates(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<Vec<ValidatorUpdate>, ChangeoverError> {
        let res = dkg::compute_dkg_updates(ctx, &*self.hooks);
        self.halt_on_error("dkg_validator_updates", ctx, res)
    }

    /// Returns this block's consensus validator updates and drains the unbonding queue.
    pub fn validator_updates(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<Vec<ValidatorUpdate>, ChangeoverError> {
        let res = retrieve::retrieve_validator_updates(ctx, &*self.hooks);
        self.halt_on_error("validator_updates", ctx, res)
    }

    /// Runs the end-of-block steps in their required order: DKG computation before
    /// retrieval, since retrieval drains the unbonding queue.
    pub fn end_block(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<EndBlockUpdates, ChangeoverError> {
        let dkg = self.dkg_validator_updates(ctx)?;
        let consensus = self.validator_updates(ctx)?;
        Ok(EndBlockUpdates { dkg, consensus })
    }

    /// Entry point for the jailing subsystem.
    pub fn record_jailed(
        &self,
        ctx: &mut ChangeoverContext<'_>,
        pub_key: PublicKey,
    ) -> Result<(), ChangeoverError> {
        let res = jail::record_jailed(ctx, pub_key);
        self.halt_on_error("record_jailed", ctx, res)
    }

    /// A read-only view of every changeover slot.
    pub fn snapshot(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<PhaseSnapshot, ChangeoverError> {
        let res = phase_store(ctx).snapshot();
        self.halt_on_error("snapshot", ctx, res)
    }

    /// Logs and counts a fatal error before handing it back to the host, which must
    /// abort the block.
    fn halt_on_error<T>(
        &self,
        op: &'static str,
        ctx: &ChangeoverContext<'_>,
        res: Result<T, ChangeoverError>,
    ) -> Result<T, ChangeoverError> {
        if let Err(e) = &res {
            self.error_sink
                .unwrap_or_else(error_metrics)
                .inc_error("Changeover", e.code());
            tracing::error!(
                target: "changeover",
                op,
                height = ctx.height(),
                code = e.code(),
                error = %e,
                "changeover step failed, block must halt"
            );
        }
        res
    }
}

impl OnBeginBlock for ChangeoverKeeper {
    fn on_begin_block(&self, ctx: &mut ChangeoverContext<'_>) -> Result<(), ChangeoverError> {
        self.begin_block(ctx).map(|_| ())
    }
}

impl OnEndBlock for ChangeoverKeeper {
    type Output = EndBlockUpdates;

    fn on_end_block(
        &self,
        ctx: &mut ChangeoverContext<'_>,
    ) -> Result<EndBlockUpdates, ChangeoverError> {
        self.end_block(ctx)
    }
}
