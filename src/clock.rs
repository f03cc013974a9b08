use chrono::{DateTime, Utc};

use currentz_core::Clock;

/// Wall clock. "Today" is the current UTC calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
