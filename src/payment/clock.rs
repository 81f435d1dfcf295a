//! Clocks

use std::sync::atomic::{AtomicI64, Ordering};

use jiff::Timestamp;

/// Wall clock used to stamp records.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// System time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Advances by a fixed number of milliseconds on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    next_millis: AtomicI64,
    step_millis: i64,
}

impl SteppingClock {
    /// Clock whose first reading is `start`.
    pub fn new(start: Timestamp, step_millis: i64) -> Self {
        Self {
            next_millis: AtomicI64::new(start.as_millisecond()),
            step_millis,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Timestamp {
        let millis = self.next_millis.fetch_add(self.step_millis, Ordering::Relaxed);

        Timestamp::from_millisecond(millis).unwrap_or(Timestamp::MAX)
    }
}
