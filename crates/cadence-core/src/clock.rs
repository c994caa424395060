//! Source of the current time for completion-relative recurrence.
//!
//! ## Summary
//! The recurrence calculator never reads ambient time on its own. Callers pass
//! a [`Clock`] so tests can pin the current instant. Completion timestamps and
//! completion-relative baselines come from the same clock.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Supplies the current local time.
pub trait Clock {
    /// Returns the current local date-time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date, read through [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// A clock pinned to midnight of `date`.
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
