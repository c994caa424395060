//! Recurrence rule value attached to a task.

mod weekday;

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{RecurError, RecurResult};

pub use weekday::{DAYS_PER_WEEK, WeekdaySet, weekday_from_index};

/// How a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    /// Does not repeat.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceKind {
    /// Returns the stable lowercase name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Returns all kinds in declaration order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::None,
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
        ]
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceKind {
    type Err = RecurError;

    /// Parses a kind name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => return Err(RecurError::UnknownKind(s.to_string())),
        })
    }
}

/// ## Summary
/// Describes how a recurring task repeats.
///
/// Equality is structural over all four fields. Because the weekday selection
/// is a set, order and duplicates never affect equality; callers compare rules
/// to decide whether a previously computed occurrence is stale.
///
/// `period` is always at least 1. Non-positive periods are rejected when the
/// rule is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleRepr")]
pub struct RecurrenceRule {
    kind: RecurrenceKind,
    period: u32,
    completion_relative: bool,
    weekdays: WeekdaySet,
}

impl RecurrenceRule {
    /// Creates a schedule-relative rule with a period of 1 and no weekdays.
    #[must_use]
    pub const fn new(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            period: 1,
            completion_relative: false,
            weekdays: WeekdaySet::EMPTY,
        }
    }

    /// A rule that never advances.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(RecurrenceKind::None)
    }

    /// Every `period` days.
    ///
    /// ## Errors
    /// Returns `RecurError::InvalidPeriod` if `period < 1`.
    pub fn daily(period: i64) -> RecurResult<Self> {
        Self::new(RecurrenceKind::Daily).with_period(period)
    }

    /// Every `period` weeks, on the given weekdays (or the same weekday when
    /// `weekdays` is empty).
    ///
    /// ## Errors
    /// Returns `RecurError::InvalidPeriod` if `period < 1`.
    pub fn weekly<I>(period: i64, weekdays: I) -> RecurResult<Self>
    where
        I: IntoIterator<Item = Weekday>,
    {
        Ok(Self::new(RecurrenceKind::Weekly)
            .with_period(period)?
            .with_weekdays(weekdays.into_iter().collect()))
    }

    /// Every `period` months.
    ///
    /// ## Errors
    /// Returns `RecurError::InvalidPeriod` if `period < 1`.
    pub fn monthly(period: i64) -> RecurResult<Self> {
        Self::new(RecurrenceKind::Monthly).with_period(period)
    }

    /// Every `period` years.
    ///
    /// ## Errors
    /// Returns `RecurError::InvalidPeriod` if `period < 1`.
    pub fn yearly(period: i64) -> RecurResult<Self> {
        Self::new(RecurrenceKind::Yearly).with_period(period)
    }

    /// ## Errors
    /// Returns `RecurError::InvalidPeriod` if `period < 1`.
    pub fn with_period(mut self, period: i64) -> RecurResult<Self> {
        self.set_period(period)?;
        Ok(self)
    }

    #[must_use]
    pub const fn with_completion_relative(mut self, completion_relative: bool) -> Self {
        self.completion_relative = completion_relative;
        self
    }

    #[must_use]
    pub const fn with_weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = weekdays;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> RecurrenceKind {
        self.kind
    }

    #[must_use]
    pub const fn period(&self) -> u32 {
        self.period
    }

    #[must_use]
    pub const fn is_completion_relative(&self) -> bool {
        self.completion_relative
    }

    /// Selected weekdays. Only consulted when the kind is weekly.
    #[must_use]
    pub const fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    /// Whether evaluating this rule ever moves the schedule forward.
    #[must_use]
    pub const fn repeats(&self) -> bool {
        !matches!(self.kind, RecurrenceKind::None)
    }

    pub const fn set_kind(&mut self, kind: RecurrenceKind) {
        self.kind = kind;
    }

    /// ## Errors
    /// Returns `RecurError::InvalidPeriod` if `period < 1`; the rule is left
    /// unchanged in that case.
    pub fn set_period(&mut self, period: i64) -> RecurResult<()> {
        self.period = u32::try_from(period)
            .ok()
            .filter(|&period| period >= 1)
            .ok_or(RecurError::InvalidPeriod(period))?;
        Ok(())
    }

    pub const fn set_completion_relative(&mut self, completion_relative: bool) {
        self.completion_relative = completion_relative;
    }

    pub const fn set_weekdays(&mut self, weekdays: WeekdaySet) {
        self.weekdays = weekdays;
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} every {}", self.kind, self.period)?;
        if !self.weekdays.is_empty() {
            write!(f, " on {}", self.weekdays)?;
        }
        if self.completion_relative {
            f.write_str(" after completion")?;
        }
        Ok(())
    }
}

/// Wire shape accepted on deserialization. Missing fields take their
/// defaults; `period` is range-checked before a rule is produced.
#[derive(Deserialize)]
struct RuleRepr {
    #[serde(default)]
    kind: RecurrenceKind,
    #[serde(default = "default_period")]
    period: i64,
    #[serde(default)]
    completion_relative: bool,
    #[serde(default)]
    weekdays: WeekdaySet,
}

const fn default_period() -> i64 {
    1
}

impl TryFrom<RuleRepr> for RecurrenceRule {
    type Error = RecurError;

    fn try_from(repr: RuleRepr) -> Result<Self, Self::Error> {
        Ok(Self::new(repr.kind)
            .with_period(repr.period)?
            .with_completion_relative(repr.completion_relative)
            .with_weekdays(repr.weekdays))
    }
}
