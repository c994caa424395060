//! Applies recurrence rules to task records.

use cadence_core::clock::{Clock, FixedClock};
use cadence_recur::{RecurrenceRule, advance, next_occurrence};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::task::TaskItem;

/// Outcome of completing a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// The task as completed.
    pub completed: TaskItem,
    /// The next instance, for recurring tasks.
    pub next: Option<TaskItem>,
}

/// ## Summary
/// Evaluates task recurrence against an injected clock.
///
/// The clock is the only time source: each operation reads it once and uses
/// that instant both as the completion time and as the "today" of
/// completion-relative rules. Holds no state besides the clock, so one
/// instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceService<C> {
    clock: C,
}

impl<C: Clock> RecurrenceService<C> {
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// ## Summary
    /// Computes when the instance after `task` would be due.
    ///
    /// Counts from the task's planned instant, or from the clock's current
    /// instant when the task is unplanned. Completion-relative rules count from
    /// the clock's date instead. Returns `None` for tasks without a repeating
    /// rule.
    ///
    /// ## Errors
    /// Propagates calculator failures.
    pub fn preview_next(&self, task: &TaskItem) -> ServiceResult<Option<NaiveDateTime>> {
        Self::next_after(task, self.clock.now())
    }

    /// ## Summary
    /// Marks `task` completed now and, if it recurs, builds the next instance.
    ///
    /// The new instance carries a `next_planned` preview counted from its own
    /// planned instant, as if it were completed on schedule.
    ///
    /// ## Errors
    /// - `ServiceError::Conflict` if the task is already completed.
    /// - Calculator failures while computing the next instance.
    #[tracing::instrument(skip(self, task), fields(task_id = %task.id))]
    pub fn complete(&self, task: &TaskItem) -> ServiceResult<Completion> {
        if task.is_completed() {
            return Err(ServiceError::Conflict(format!(
                "task {} is already completed",
                task.id
            )));
        }

        let now = self.clock.now();
        let mut completed = task.clone();
        completed.completed_at = Some(now);
        completed.next_planned = None;

        let next = match Self::next_after(task, now)? {
            Some(planned) => {
                let mut successor = task.successor(planned);
                successor.next_planned = successor
                    .repeating_rule()
                    .map(|rule| advance(rule, planned))
                    .transpose()?;
                tracing::debug!(
                    successor_id = %successor.id,
                    %planned,
                    next_planned = ?successor.next_planned,
                    "Created next instance of recurring task"
                );
                Some(successor)
            }
            None => {
                tracing::debug!("Task does not recur");
                None
            }
        };

        Ok(Completion { completed, next })
    }

    /// ## Summary
    /// Recomputes `task.next_planned` if its rule differs from `previous`.
    ///
    /// Returns `true` when the rule changed and the preview was refreshed.
    /// Rules are compared structurally, so reordering or duplicating weekdays
    /// does not count as a change.
    ///
    /// ## Errors
    /// Propagates calculator failures; `task` is left untouched in that case.
    pub fn refresh_if_changed(
        &self,
        task: &mut TaskItem,
        previous: Option<&RecurrenceRule>,
    ) -> ServiceResult<bool> {
        if task.recurrence.as_ref() == previous {
            tracing::trace!(task_id = %task.id, "Recurrence unchanged");
            return Ok(false);
        }

        let next_planned = self.preview_next(task)?;
        tracing::debug!(
            task_id = %task.id,
            old = ?task.next_planned,
            new = ?next_planned,
            "Recurrence changed, refreshed next occurrence"
        );
        task.next_planned = next_planned;
        Ok(true)
    }

    fn next_after(task: &TaskItem, now: NaiveDateTime) -> ServiceResult<Option<NaiveDateTime>> {
        let Some(rule) = task.repeating_rule() else {
            return Ok(None);
        };
        let reference = task.planned.unwrap_or(now);
        Ok(Some(next_occurrence(rule, reference, &FixedClock(now))?))
    }
}
