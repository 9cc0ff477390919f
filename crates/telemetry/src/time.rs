// Path: crates/telemetry/src/time.rs
use crate::sinks::MetricsSink;
use std::time::Instant;

/// Records the lifetime of a storage commit as its latency.
pub struct CommitTimer<'a> {
    sink: &'a dyn MetricsSink,
    backend: &'static str,
    start: Instant,
}

impl<'a> CommitTimer<'a> {
    pub fn new(sink: &'a dyn MetricsSink, backend: &'static str) -> Self {
        Self {
            sink,
            backend,
            start: Instant::now(),
        }
    }
}

impl Drop for CommitTimer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_commit_duration(self.backend, self.start.elapsed().as_secs_f64());
    }
}
