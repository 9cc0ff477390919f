// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter,
    register_int_counter_vec, register_int_gauge, Encoder, HistogramVec, IntCounter,
    IntCounterVec, IntGauge, TextEncoder,
};

/// The collectors backing [`PrometheusSink`], registered once in the default registry.
#[derive(Debug)]
struct Collectors {
    votes_accepted_total: IntCounter,
    duplicate_votes_total: IntCounter,
    registrations_total: IntCounter,
    duplicate_registrations_total: IntCounter,
    tally_total: IntGauge,
    storage_commits_total: IntCounterVec,
    storage_commit_failures_total: IntCounterVec,
    storage_commit_duration_seconds: HistogramVec,
    verifications_total: IntCounterVec,
    errors_total: IntCounterVec,
}

static COLLECTORS: OnceCell<Collectors> = OnceCell::new();
static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;

/// A metrics sink that forwards every observation to Prometheus collectors.
///
/// Observations made before [`install`] are dropped.
#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

impl LedgerMetricsSink for PrometheusSink {
    fn inc_votes_accepted(&self) {
        if let Some(c) = COLLECTORS.get() {
            c.votes_accepted_total.inc();
        }
    }
    fn inc_duplicate_votes(&self) {
        if let Some(c) = COLLECTORS.get() {
            c.duplicate_votes_total.inc();
        }
    }
    fn inc_registrations(&self) {
        if let Some(c) = COLLECTORS.get() {
            c.registrations_total.inc();
        }
    }
    fn inc_duplicate_registrations(&self) {
        if let Some(c) = COLLECTORS.get() {
            c.duplicate_registrations_total.inc();
        }
    }
    fn set_total_votes(&self, total: u64) {
        if let Some(c) = COLLECTORS.get() {
            c.tally_total.set(i64::try_from(total).unwrap_or(i64::MAX));
        }
    }
}

impl StorageMetricsSink for PrometheusSink {
    fn inc_commits(&self, backend: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.storage_commits_total.with_label_values(&[backend]).inc();
        }
    }
    fn inc_commit_failures(&self, backend: &'static str, code: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.storage_commit_failures_total
                .with_label_values(&[backend, code])
                .inc();
        }
    }
    fn observe_commit_duration(&self, backend: &'static str, duration_secs: f64) {
        if let Some(c) = COLLECTORS.get() {
            c.storage_commit_duration_seconds
                .with_label_values(&[backend])
                .observe(duration_secs);
        }
    }
}

impl VerificationMetricsSink for PrometheusSink {
    fn inc_verification(&self, step: &'static str, outcome: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.verifications_total
                .with_label_values(&[step, outcome])
                .inc();
        }
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.errors_total.with_label_values(&[kind, variant]).inc();
        }
    }
}

fn register_collectors() -> Result<Collectors, prometheus::Error> {
    Ok(Collectors {
        votes_accepted_total: register_int_counter!(
            "evote_ledger_votes_accepted_total",
            "Total votes counted by the ledger."
        )?,
        duplicate_votes_total: register_int_counter!(
            "evote_ledger_duplicate_votes_total",
            "Total cast_vote calls refused because the voter had already voted."
        )?,
        registrations_total: register_int_counter!(
            "evote_ledger_registrations_total",
            "Total election registrations recorded."
        )?,
        duplicate_registrations_total: register_int_counter!(
            "evote_ledger_duplicate_registrations_total",
            "Total registrations refused as duplicates."
        )?,
        tally_total: register_int_gauge!(
            "evote_ledger_tally_total",
            "Current sum of all tally entries."
        )?,
        storage_commits_total: register_int_counter_vec!(
            "evote_storage_commits_total",
            "Total successful ledger commits.",
            &["backend"]
        )?,
        storage_commit_failures_total: register_int_counter_vec!(
            "evote_storage_commit_failures_total",
            "Total failed ledger commits.",
            &["backend", "code"]
        )?,
        storage_commit_duration_seconds: register_histogram_vec!(
            "evote_storage_commit_duration_seconds",
            "Latency of a single ledger commit.",
            &["backend"],
            exponential_buckets(0.0005, 2.0, 15)?
        )?,
        verifications_total: register_int_counter_vec!(
            "evote_verifications_total",
            "Verification attempts by step and outcome.",
            &["step", "outcome"]
        )?,
        errors_total: register_int_counter_vec!(
            "evote_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?,
    })
}

/// Initializes all Prometheus collectors and installs [`PrometheusSink`] as the
/// global sink. Calling it again returns the already-installed sink.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    COLLECTORS.get_or_try_init(register_collectors)?;
    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    // A different sink may already be installed; the collectors still record.
    let _ = SINK.set(sink);
    Ok(sink)
}

/// Renders every registered metric in the Prometheus text exposition format.
pub fn render() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent_and_render_includes_counters() {
        install().unwrap();
        install().unwrap();
        crate::ledger_metrics().inc_votes_accepted();
        crate::storage_metrics().inc_commits("memory");
        let text = render().unwrap();
        assert!(text.contains("evote_ledger_votes_accepted_total"));
        assert!(text.contains("evote_storage_commits_total{backend=\"memory\"}"));
    }
}
