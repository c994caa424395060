//! Set of selected weekdays for weekly recurrence.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of weekday indices (Monday = 0 through Sunday = 6).
pub const DAYS_PER_WEEK: u32 = 7;

/// ## Summary
/// A set of weekdays keyed by Monday-based index.
///
/// Membership is all that matters: insertion order and duplicates are not
/// kept, so two sets built from `[0, 2]` and `[2, 0, 0]` are equal. An empty
/// set is the same value whether it came from no selection or an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty selection.
    pub const EMPTY: Self = Self(0);

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// ## Summary
    /// Builds a set from raw indices, silently dropping anything outside
    /// `0..=6`.
    #[must_use]
    pub fn from_indices<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut set = Self::new();
        for index in indices {
            if (0..i64::from(DAYS_PER_WEEK)).contains(&index) {
                set.insert_index(index);
            } else {
                tracing::trace!(index, "Ignoring out-of-range weekday index");
            }
        }
        set
    }

    /// Adds a weekday. Returns `true` if it was not already present.
    pub fn insert(&mut self, weekday: Weekday) -> bool {
        let bit = Self::bit(weekday.num_days_from_monday());
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    /// ## Summary
    /// Adds a weekday by Monday-based index.
    ///
    /// Returns `true` only if the index was in range and newly added.
    pub fn insert_index(&mut self, index: i64) -> bool {
        match u32::try_from(index) {
            Ok(index) if index < DAYS_PER_WEEK => {
                let bit = Self::bit(index);
                let added = self.0 & bit == 0;
                self.0 |= bit;
                added
            }
            _ => false,
        }
    }

    /// Removes a weekday. Returns `true` if it was present.
    pub fn remove(&mut self, weekday: Weekday) -> bool {
        let bit = Self::bit(weekday.num_days_from_monday());
        let removed = self.0 & bit != 0;
        self.0 &= !bit;
        removed
    }

    #[must_use]
    pub fn contains(self, weekday: Weekday) -> bool {
        self.contains_index(weekday.num_days_from_monday())
    }

    #[must_use]
    pub const fn contains_index(self, index: u32) -> bool {
        index < DAYS_PER_WEEK && self.0 & Self::bit(index) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// ## Summary
    /// Returns the smallest selected index that is `>= start`, if any.
    ///
    /// A `start` of 7 or more always yields `None`.
    #[must_use]
    pub fn first_from(self, start: u32) -> Option<u32> {
        (start..DAYS_PER_WEEK).find(|&index| self.contains_index(index))
    }

    /// Selected indices in ascending order.
    pub fn indices(self) -> impl Iterator<Item = u32> {
        (0..DAYS_PER_WEEK).filter(move |&index| self.contains_index(index))
    }

    /// Selected weekdays, Monday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        self.indices().filter_map(weekday_from_index)
    }

    const fn bit(index: u32) -> u8 {
        1 << index
    }
}

/// Maps a Monday-based index back to a `chrono::Weekday`.
#[must_use]
pub fn weekday_from_index(index: u32) -> Option<Weekday> {
    u8::try_from(index)
        .ok()
        .and_then(|index| Weekday::try_from(index).ok())
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = Self::new();
        for weekday in iter {
            set.insert(weekday);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for weekday in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{weekday}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.indices())
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    /// Accepts `null` or a list of integers; out-of-range entries are dropped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Vec<i64>>::deserialize(deserializer)?;
        Ok(raw.map(Self::from_indices).unwrap_or_default())
    }
}
