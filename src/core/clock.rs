use std::fmt;
use std::sync::Mutex;
use chrono::{Duration, NaiveDateTime, Utc};

/// Time source for circulation timestamps (`since`, `until`, `hold_placed`, `checked_in`).
///
/// Production code injects [`SystemClock`]; tests inject a [`ManualClock`] so that
/// loan periods and hold ordering are deterministic.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now().naive_utc())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crate::core::clock::{Clock, ManualClock};

    #[tokio::test]
    async fn test_should_advance_manual_clock() {
        let clock = ManualClock::default();
        let start = clock.now();
        assert_eq!(start, clock.now());
        clock.advance(Duration::minutes(5));
        assert_eq!(start + Duration::minutes(5), clock.now());
    }
}
