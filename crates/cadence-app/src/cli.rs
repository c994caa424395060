//! Command-line arguments and their conversion into domain values.

use std::path::PathBuf;

use anyhow::{Context, bail};
use cadence_core::config::RecurrenceConfig;
use cadence_recur::{RecurrenceKind, RecurrenceRule, WeekdaySet};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(about = "Recurring task scheduling", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the next occurrence(s) of a recurrence rule
    Next(NextArgs),
    /// Complete a task read as JSON and print the result, including the next
    /// instance for recurring tasks
    Complete(CompleteArgs),
}

#[derive(Args, Debug)]
pub struct NextArgs {
    /// Recurrence kind: none, daily, weekly, monthly or yearly
    #[arg(long, default_value = "daily")]
    pub kind: RecurrenceKind,

    /// Repeat every N units (defaults to `recurrence.default_period`)
    #[arg(long, allow_negative_numbers = true)]
    pub period: Option<i64>,

    /// Weekdays for weekly rules: names (mon, tuesday, ...) or indices 0-6
    #[arg(long, value_delimiter = ',')]
    pub weekdays: Vec<String>,

    /// Count from today instead of the reference instant
    #[arg(long)]
    pub completion_relative: bool,

    /// Reference instant: YYYY-MM-DD, YYYY-MM-DDTHH:MM or YYYY-MM-DDTHH:MM:SS.
    /// Defaults to now.
    #[arg(long)]
    pub from: Option<String>,

    /// How many occurrences to print
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Print the rule in its JSON wire form before the occurrences
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Path to the task JSON
    pub task: PathBuf,

    /// Completion instant (same formats as `next --from`). Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

/// ## Summary
/// Builds a rule from `next` arguments, filling gaps from configuration.
///
/// ## Errors
/// Returns an error for a non-positive period or an unrecognized weekday.
pub fn build_rule(args: &NextArgs, defaults: &RecurrenceConfig) -> anyhow::Result<RecurrenceRule> {
    let period = args
        .period
        .unwrap_or_else(|| i64::from(defaults.default_period));
    let weekdays = parse_weekdays(&args.weekdays)?;

    Ok(RecurrenceRule::new(args.kind)
        .with_period(period)?
        .with_completion_relative(args.completion_relative || defaults.completion_relative)
        .with_weekdays(weekdays))
}

/// ## Summary
/// Parses weekday tokens. Numeric tokens outside `0..=6` are ignored, the same
/// way stored rules treat them.
///
/// ## Errors
/// Returns an error for a token that is neither a weekday name nor an integer.
pub fn parse_weekdays(tokens: &[String]) -> anyhow::Result<WeekdaySet> {
    let mut indices = Vec::with_capacity(tokens.len());
    for token in tokens.iter().map(|token| token.trim()).filter(|t| !t.is_empty()) {
        if let Ok(index) = token.parse::<i64>() {
            if !(0..7).contains(&index) {
                tracing::warn!(index, "Ignoring weekday index outside 0-6");
            }
            indices.push(index);
        } else if let Ok(weekday) = token.parse::<Weekday>() {
            indices.push(i64::from(weekday.num_days_from_monday()));
        } else {
            bail!("unrecognized weekday: {token}");
        }
    }
    Ok(WeekdaySet::from_indices(indices))
}

/// ## Summary
/// Parses a date or date-time. A bare date means midnight.
///
/// ## Errors
/// Returns an error if no supported format matches.
pub fn parse_instant(value: &str) -> anyhow::Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(instant) = value.parse::<NaiveDateTime>() {
        return Ok(instant);
    }
    if let Ok(instant) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(instant);
    }
    let date = value
        .parse::<NaiveDate>()
        .with_context(|| format!("invalid date or date-time: {value}"))?;
    Ok(date.and_time(NaiveTime::MIN))
}
