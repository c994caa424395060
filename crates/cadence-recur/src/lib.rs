//! Recurrence rules for repeating tasks and the calculator that turns a rule
//! plus a reference instant into the next planned instant.

pub mod error;
pub mod occurrence;
pub mod rule;

pub use error::{RecurError, RecurResult};
pub use occurrence::{Occurrences, advance, baseline, next_occurrence, occurrences};
pub use rule::{RecurrenceKind, RecurrenceRule, WeekdaySet};
