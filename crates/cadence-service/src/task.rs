use cadence_recur::RecurrenceRule;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ## Summary
/// A task record as far as recurrence is concerned.
///
/// `planned` is when this instance is due. `next_planned` caches when the
/// following instance would be due, for display; it is recomputed whenever
/// the rule changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: Uuid,
    pub title: String,
    pub planned: Option<NaiveDateTime>,
    pub next_planned: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub recurrence: Option<RecurrenceRule>,
}

impl TaskItem {
    /// Creates an open, unplanned, non-recurring task.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            planned: None,
            next_planned: None,
            completed_at: None,
            recurrence: None,
        }
    }

    #[must_use]
    pub const fn with_planned(mut self, planned: NaiveDateTime) -> Self {
        self.planned = Some(planned);
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// The rule, if the task carries one that actually repeats.
    #[must_use]
    pub fn repeating_rule(&self) -> Option<&RecurrenceRule> {
        self.recurrence.as_ref().filter(|rule| rule.repeats())
    }

    /// ## Summary
    /// Builds the next instance of this task: fresh id, same title and rule,
    /// open, due at `planned`.
    #[must_use]
    pub fn successor(&self, planned: NaiveDateTime) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: self.title.clone(),
            planned: Some(planned),
            next_planned: None,
            completed_at: None,
            recurrence: self.recurrence.clone(),
        }
    }
}
