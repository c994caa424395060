//! Next-occurrence calculation.
//!
//! ## Summary
//! Evaluation happens in two steps. [`baseline`] resolves the instant to count
//! from: the caller's reference for schedule-relative rules, or midnight of
//! the clock's current date for completion-relative ones. [`advance`] then
//! moves that baseline forward according to the rule's kind and period.
//!
//! Both steps are pure. The clock is read at most once per evaluation.

mod iter;
mod weekly;

use cadence_core::clock::Clock;
use chrono::{Days, Months, NaiveDateTime, NaiveTime};

use crate::error::{RecurError, RecurResult};
use crate::rule::{RecurrenceKind, RecurrenceRule};

pub use iter::{Occurrences, occurrences};

/// ## Summary
/// Resolves the instant a rule counts from.
///
/// Completion-relative rules discard `reference` and start at midnight of
/// `clock.today()`. All other rules start at `reference`, time of day intact.
#[must_use]
pub fn baseline<C: Clock + ?Sized>(
    rule: &RecurrenceRule,
    reference: NaiveDateTime,
    clock: &C,
) -> NaiveDateTime {
    if rule.is_completion_relative() {
        clock.today().and_time(NaiveTime::MIN)
    } else {
        reference
    }
}

/// ## Summary
/// Computes the next instant at which a task governed by `rule` reappears.
///
/// ## Errors
/// - `RecurError::OutOfRange` if the result falls outside the calendar range
///   chrono can represent.
/// - `RecurError::UnreachableState` if the weekly pattern search fails even
///   though the selection is non-empty. This indicates a bug.
pub fn next_occurrence<C: Clock + ?Sized>(
    rule: &RecurrenceRule,
    reference: NaiveDateTime,
    clock: &C,
) -> RecurResult<NaiveDateTime> {
    let start = baseline(rule, reference, clock);
    tracing::trace!(
        kind = %rule.kind(),
        period = rule.period(),
        completion_relative = rule.is_completion_relative(),
        %reference,
        baseline = %start,
        "Resolved recurrence baseline"
    );
    advance(rule, start)
}

/// ## Summary
/// Moves an already-resolved baseline forward by one step of `rule`.
///
/// Ignores the completion-relative flag. Month and year steps clamp the day
/// of month to the end of a shorter target month (Jan 31 + 1 month lands on
/// the last day of February).
///
/// ## Errors
/// See [`next_occurrence`].
pub fn advance(rule: &RecurrenceRule, start: NaiveDateTime) -> RecurResult<NaiveDateTime> {
    let period = rule.period();
    let next = match rule.kind() {
        RecurrenceKind::None => Some(start),
        RecurrenceKind::Daily => start.checked_add_days(Days::new(u64::from(period))),
        RecurrenceKind::Weekly => return weekly::next_weekly(rule, start),
        RecurrenceKind::Monthly => start.checked_add_months(Months::new(period)),
        RecurrenceKind::Yearly => period
            .checked_mul(12)
            .and_then(|months| start.checked_add_months(Months::new(months))),
    };

    let next = next.ok_or_else(|| out_of_range(rule, start))?;
    tracing::trace!(kind = %rule.kind(), period, %start, %next, "Advanced recurrence");
    Ok(next)
}

/// Adds whole days, reporting overflow against the rule being evaluated.
fn add_days(rule: &RecurrenceRule, start: NaiveDateTime, days: u64) -> RecurResult<NaiveDateTime> {
    start
        .checked_add_days(Days::new(days))
        .ok_or_else(|| out_of_range(rule, start))
}

fn out_of_range(rule: &RecurrenceRule, baseline: NaiveDateTime) -> RecurError {
    RecurError::OutOfRange {
        kind: rule.kind(),
        period: rule.period(),
        baseline,
    }
}
