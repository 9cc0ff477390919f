// Path: crates/storage/src/metrics.rs
use evote_api::storage::StorageError;
use evote_telemetry::sinks::StorageMetricsSink;
use evote_telemetry::storage_metrics;
use evote_telemetry::time::CommitTimer;
use evote_types::error::ErrorCode;

/// Runs one commit, recording its latency and outcome against `backend`.
pub(crate) fn instrumented_commit<T>(
    backend: &'static str,
    commit: impl FnOnce() -> Result<T, StorageError>,
) -> Result<T, StorageError> {
    let sink = storage_metrics();
    let _timer = CommitTimer::new(sink, backend);
    let result = commit();
    match &result {
        Ok(_) => sink.inc_commits(backend),
        Err(e) => sink.inc_commit_failures(backend, e.code()),
    }
    result
}
