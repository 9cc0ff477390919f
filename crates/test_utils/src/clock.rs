// Path: crates/test_utils/src/clock.rs
//! A clock that only moves when told to.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use evote_api::time::Clock;
use std::sync::Mutex;

/// A [`Clock`] pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// A clock stopped at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// A clock stopped at noon UTC on the given calendar date.
    ///
    /// Returns `None` for an impossible date.
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        let noon = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(12, 0, 0)?;
        Some(Self::new(Utc.from_utc_datetime(&noon)))
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}
