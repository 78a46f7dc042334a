//! Injected time source for the realtime driver.
//!
//! The driver samples a clock once per tick instead of scheduling itself, so
//! a slow consumer simply delays wall-clock progress. Tests inject
//! [`ManualClock`] and step it explicitly; no real sleeping is required
//! anywhere in the core.

use std::cell::Cell;

use chrono::{DateTime, TimeDelta, Utc};

/// A source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

// Shared references are clocks too, so a test can keep hold of a
// ManualClock it hands to a driver
impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stepped under caller control
#[derive(Debug)]
pub struct ManualClock {
    current: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock {
            current: Cell::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance_secs(&self, secs: i64) {
        self.current
            .set(self.current.get() + TimeDelta::seconds(secs));
    }

    /// Jump the clock to an absolute time
    pub fn set(&self, now: DateTime<Utc>) {
        self.current.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }
}
