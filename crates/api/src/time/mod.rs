// Path: crates/api/src/time/mod.rs

//! A pluggable source of the current time, so age checks and timestamps are
//! deterministic under test.

use chrono::{DateTime, NaiveDate, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Milliseconds since the Unix epoch, clamped at zero.
    fn now_millis(&self) -> u64 {
        u64::try_from(self.now().timestamp_millis()).unwrap_or(0)
    }
}

/// The wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
