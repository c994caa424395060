//! Weekly recurrence with an optional weekday pattern.

use chrono::{Datelike, NaiveDateTime};

use super::add_days;
use crate::error::{RecurError, RecurResult};
use crate::rule::{DAYS_PER_WEEK, RecurrenceRule};

/// ## Summary
/// Weekly step from `start`. Weeks run Monday through Sunday.
///
/// - No weekdays selected: `start + 7 * period` days.
/// - A selected weekday later in the current week: that day, whatever the
///   period.
/// - Otherwise: the first selected weekday of the week that begins
///   `period` Mondays after `start`.
pub(super) fn next_weekly(
    rule: &RecurrenceRule,
    start: NaiveDateTime,
) -> RecurResult<NaiveDateTime> {
    let period = u64::from(rule.period());
    let weekdays = rule.weekdays();

    if weekdays.is_empty() {
        return add_days(rule, start, u64::from(DAYS_PER_WEEK) * period);
    }

    let current = start.weekday().num_days_from_monday();

    if let Some(later) = weekdays.first_from(current + 1) {
        tracing::trace!(current, later, "Next selected weekday is in the same week");
        return add_days(rule, start, u64::from(later - current));
    }

    let to_target_monday =
        u64::from(DAYS_PER_WEEK - current) + (period - 1) * u64::from(DAYS_PER_WEEK);
    let target_monday = add_days(rule, start, to_target_monday)?;

    let first = weekdays.first_from(0).ok_or(RecurError::UnreachableState(
        "non-empty weekday selection has no first weekday",
    ))?;
    tracing::trace!(current, first, %target_monday, "Wrapped to a later week");

    add_days(rule, target_monday, u64::from(first))
}
