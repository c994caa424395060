use cadence_core::clock::Clock;
use chrono::NaiveDateTime;

use super::{advance, baseline};
use crate::error::RecurResult;
use crate::rule::RecurrenceRule;

/// ## Summary
/// Successive occurrences of a rule.
///
/// The baseline is resolved once when the iterator is created. Every later
/// step counts from the previous occurrence, so a completion-relative rule
/// behaves as if each instance were completed on its planned day.
///
/// A rule of kind `None` yields nothing. The iterator is otherwise unbounded;
/// it yields an error at most once and then ends.
#[derive(Debug, Clone)]
pub struct Occurrences {
    rule: RecurrenceRule,
    cursor: Option<NaiveDateTime>,
}

/// Builds an [`Occurrences`] iterator for `rule` starting at `reference`.
#[must_use]
pub fn occurrences<C: Clock + ?Sized>(
    rule: &RecurrenceRule,
    reference: NaiveDateTime,
    clock: &C,
) -> Occurrences {
    let cursor = rule
        .repeats()
        .then(|| baseline(rule, reference, clock));
    Occurrences {
        rule: rule.clone(),
        cursor,
    }
}

impl Iterator for Occurrences {
    type Item = RecurResult<NaiveDateTime>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor.take()?;
        match advance(&self.rule, start) {
            Ok(next) => {
                self.cursor = Some(next);
                Some(Ok(next))
            }
            Err(err) => {
                tracing::debug!(error = %err, rule = %self.rule, "Stopping occurrence iteration");
                Some(Err(err))
            }
        }
    }
}
