use chrono::NaiveDateTime;
use thiserror::Error;

use crate::rule::RecurrenceKind;

/// Errors raised while building or evaluating a recurrence rule
#[derive(Error, Debug)]
pub enum RecurError {
    #[error("Invalid period {0}: a recurrence period must be at least 1")]
    InvalidPeriod(i64),

    #[error("Unknown recurrence kind: {0}")]
    UnknownKind(String),

    #[error("Adding {period} x {kind} to {baseline} leaves the supported calendar range")]
    OutOfRange {
        kind: RecurrenceKind,
        period: u32,
        baseline: NaiveDateTime,
    },

    /// A branch that well-formed input can never reach. Seeing this is a bug.
    #[error("Unreachable state: {0}")]
    UnreachableState(&'static str),
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;
