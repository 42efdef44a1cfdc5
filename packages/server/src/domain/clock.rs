//! Source of the current wall-clock time.

use chrono::{NaiveDateTime, NaiveTime};

/// Wall-clock time as seen by the server (local time, no time zone).
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}
