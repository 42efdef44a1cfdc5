//! Clock implementations.

use chrono::NaiveDateTime;
use kaiwa_shared::time::local_now;

use crate::domain::Clock;

/// Reads the server's local wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        local_now()
    }
}

/// Always reports the same instant. Used to pin the time of day in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
