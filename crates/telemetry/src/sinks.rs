// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured changeover metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn changeover_metrics() -> &'static dyn ChangeoverMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics related to validator-set changeover.
pub trait ChangeoverMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for phase flags raised, labeled by phase.
    fn inc_phase_raised(&self, phase: &'static str);
    /// Increments the counter for DKG committees computed, and records the committee size.
    fn observe_committee_computed(&self, size: usize);
    /// Increments the counter for DKG committees promoted into the consensus set.
    fn inc_committee_promoted(&self);
    /// Increments the counter for jailed validators stopped from producing blocks.
    fn inc_jailed_stopped(&self, count: u64);
    /// Observes the duration of one end-of-block retrieval.
    fn observe_retrieve_duration(&self, duration_secs: f64);
}
impl ChangeoverMetricsSink for NopSink {
    fn inc_phase_raised(&self, _phase: &'static str) {}
    fn observe_committee_computed(&self, _size: usize) {}
    fn inc_committee_promoted(&self) {}
    fn inc_jailed_stopped(&self, _count: u64) {}
    fn observe_retrieve_duration(&self, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: ChangeoverMetricsSink + ErrorMetricsSink {}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where T: ChangeoverMetricsSink + ErrorMetricsSink {}
