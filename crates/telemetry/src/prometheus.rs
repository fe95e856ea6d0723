// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram, register_int_counter, register_int_counter_vec,
    Histogram, IntCounter, IntCounterVec,
};

// --- Metric Statics ---
// The collectors are initialized exactly once by the `install` function.

static CHANGEOVER_PHASES_RAISED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static CHANGEOVER_COMMITTEES_COMPUTED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static CHANGEOVER_COMMITTEE_SIZE: OnceCell<Histogram> = OnceCell::new();
static CHANGEOVER_COMMITTEES_PROMOTED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static CHANGEOVER_JAILED_STOPPED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static CHANGEOVER_RETRIEVE_DURATION_SECONDS: OnceCell<Histogram> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs `$body` against the collector if `install()` has been called. Recording
/// into an uninstalled sink is a no-op.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl ChangeoverMetricsSink for PrometheusSink {
    fn inc_phase_raised(&self, phase: &'static str) {
        with_metric!(CHANGEOVER_PHASES_RAISED_TOTAL, |m| m
            .with_label_values(&[phase])
            .inc());
    }
    fn observe_committee_computed(&self, size: usize) {
        with_metric!(CHANGEOVER_COMMITTEES_COMPUTED_TOTAL, |m| m.inc());
        with_metric!(CHANGEOVER_COMMITTEE_SIZE, |m| m.observe(size as f64));
    }
    fn inc_committee_promoted(&self) {
        with_metric!(CHANGEOVER_COMMITTEES_PROMOTED_TOTAL, |m| m.inc());
    }
    fn inc_jailed_stopped(&self, count: u64) {
        with_metric!(CHANGEOVER_JAILED_STOPPED_TOTAL, |m| m.inc_by(count));
    }
    fn observe_retrieve_duration(&self, duration_secs: f64) {
        with_metric!(CHANGEOVER_RETRIEVE_DURATION_SECONDS, |m| m
            .observe(duration_secs));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, variant]).inc());
    }
}

fn already_installed() -> prometheus::Error {
    prometheus::Error::Msg("prometheus sink already installed".into())
}

/// Initializes all Prometheus metrics collectors and returns a static reference to the sink.
/// This function must be called only once at application startup.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    CHANGEOVER_PHASES_RAISED_TOTAL
        .set(register_int_counter_vec!(
            "aeon_changeover_phases_raised_total",
            "Total number of changeover phase flags raised.",
            &["phase"]
        )?)
        .map_err(|_| already_installed())?;
    CHANGEOVER_COMMITTEES_COMPUTED_TOTAL
        .set(register_int_counter!(
            "aeon_changeover_committees_computed_total",
            "Total number of DKG committees computed."
        )?)
        .map_err(|_| already_installed())?;
    CHANGEOVER_COMMITTEE_SIZE
        .set(register_histogram!(
            "aeon_changeover_committee_size",
            "Number of validator updates in each computed DKG committee.",
            exponential_buckets(1.0, 2.0, 12)?
        )?)
        .map_err(|_| already_installed())?;
    CHANGEOVER_COMMITTEES_PROMOTED_TOTAL
        .set(register_int_counter!(
            "aeon_changeover_committees_promoted_total",
            "Total number of DKG committees promoted into the consensus set."
        )?)
        .map_err(|_| already_installed())?;
    CHANGEOVER_JAILED_STOPPED_TOTAL
        .set(register_int_counter!(
            "aeon_changeover_jailed_stopped_total",
            "Total number of jailed validators stopped from producing blocks."
        )?)
        .map_err(|_| already_installed())?;
    CHANGEOVER_RETRIEVE_DURATION_SECONDS
        .set(register_histogram!(
            "aeon_changeover_retrieve_duration_seconds",
            "Latency of end-of-block validator update retrieval.",
            exponential_buckets(0.0001, 2.0, 15)?
        )?)
        .map_err(|_| already_installed())?;
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "aeon_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?)
        .map_err(|_| already_installed())?;

    static SINK: PrometheusSink = PrometheusSink;
    Ok(&SINK)
}
