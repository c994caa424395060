//! Shared building blocks for the cadence task manager: errors, settings and
//! the clock capability used by completion-relative recurrence.

pub mod clock;
pub mod config;
pub mod error;
