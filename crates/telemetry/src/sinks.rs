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

/// Returns a static reference to the configured sink, for error metrics.
/// If no sink has been initialized, it returns a no-op sink.
///
/// Every accessor hands out the unified sink; the split names only document
/// which family of metrics the caller is about to record.
pub fn error_metrics() -> &'static dyn MetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured ledger metrics sink.
pub fn ledger_metrics() -> &'static dyn MetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured storage metrics sink.
pub fn storage_metrics() -> &'static dyn MetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured verification metrics sink.
pub fn verification_metrics() -> &'static dyn MetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics related to the voting ledger.
pub trait LedgerMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of votes counted.
    fn inc_votes_accepted(&self);
    /// Increments the counter of `cast_vote` calls refused because the voter had already voted.
    fn inc_duplicate_votes(&self);
    /// Increments the counter of registrations recorded.
    fn inc_registrations(&self);
    /// Increments the counter of registrations refused as duplicates.
    fn inc_duplicate_registrations(&self);
    /// Sets the gauge for the current tally total.
    fn set_total_votes(&self, total: u64);
}
impl LedgerMetricsSink for NopSink {
    fn inc_votes_accepted(&self) {}
    fn inc_duplicate_votes(&self) {}
    fn inc_registrations(&self) {}
    fn inc_duplicate_registrations(&self) {}
    fn set_total_votes(&self, _total: u64) {}
}

/// A sink for metrics related to the persistent storage layer.
pub trait StorageMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of successful commits, labeled by backend.
    fn inc_commits(&self, backend: &'static str);
    /// Increments the counter of failed commits, labeled by backend and error code.
    fn inc_commit_failures(&self, backend: &'static str, code: &'static str);
    /// Observes the latency of a single commit, labeled by backend.
    fn observe_commit_duration(&self, backend: &'static str, duration_secs: f64);
}
impl StorageMetricsSink for NopSink {
    fn inc_commits(&self, _backend: &'static str) {}
    fn inc_commit_failures(&self, _backend: &'static str, _code: &'static str) {}
    fn observe_commit_duration(&self, _backend: &'static str, _duration_secs: f64) {}
}

/// A sink for metrics related to the verification gate.
pub trait VerificationMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter of verification attempts, labeled by step and outcome code.
    fn inc_verification(&self, step: &'static str, outcome: &'static str);
}
impl VerificationMetricsSink for NopSink {
    fn inc_verification(&self, _step: &'static str, _outcome: &'static str) {}
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
pub trait MetricsSink:
    LedgerMetricsSink + StorageMetricsSink + VerificationMetricsSink + ErrorMetricsSink
{
}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where
    T: LedgerMetricsSink + StorageMetricsSink + VerificationMetricsSink + ErrorMetricsSink
{
}
