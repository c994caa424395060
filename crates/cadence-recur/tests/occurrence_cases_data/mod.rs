use cadence_core::clock::FixedClock;
use cadence_recur::{RecurrenceKind, RecurrenceRule, WeekdaySet, next_occurrence};
use chrono::{NaiveDate, NaiveDateTime};

pub struct OccurrenceCase {
    pub name: &'static str,
    pub kind: RecurrenceKind,
    pub period: i64,
    pub weekdays: &'static [i64],
    pub completion_relative: bool,
    pub today: &'static str,
    pub reference: &'static str,
    pub expected: &'static str,
}

const NO_DAYS: &[i64] = &[];
const FAR_AWAY: &str = "1999-12-31";

#[expect(clippy::too_many_lines)]
pub fn occurrence_cases() -> Vec<OccurrenceCase> {
    vec![
        OccurrenceCase {
            name: "daily_period_3",
            kind: RecurrenceKind::Daily,
            period: 3,
            weekdays: NO_DAYS,
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2024-01-01T00:00:00",
            expected: "2024-01-04T00:00:00",
        },
        OccurrenceCase {
            name: "weekly_empty_pattern_period_2",
            kind: RecurrenceKind::Weekly,
            period: 2,
            weekdays: NO_DAYS,
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2024-01-01T00:00:00",
            expected: "2024-01-15T00:00:00",
        },
        OccurrenceCase {
            name: "weekly_mon_wed_fri_from_monday",
            kind: RecurrenceKind::Weekly,
            period: 1,
            weekdays: &[0, 2, 4],
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2024-01-01T00:00:00",
            expected: "2024-01-03T00:00:00",
        },
        OccurrenceCase {
            name: "weekly_mon_wed_fri_from_friday",
            kind: RecurrenceKind::Weekly,
            period: 1,
            weekdays: &[0, 2, 4],
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2024-01-05T00:00:00",
            expected: "2024-01-08T00:00:00",
        },
        OccurrenceCase {
            name: "weekly_wednesday_every_other_week",
            kind: RecurrenceKind::Weekly,
            period: 2,
            weekdays: &[2],
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2024-01-03T00:00:00",
            expected: "2024-01-17T00:00:00",
        },
        OccurrenceCase {
            name: "monthly_leap_clamp",
            kind: RecurrenceKind::Monthly,
            period: 1,
            weekdays: NO_DAYS,
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2024-01-31T00:00:00",
            expected: "2024-02-29T00:00:00",
        },
        OccurrenceCase {
            name: "monthly_non_leap_clamp",
            kind: RecurrenceKind::Monthly,
            period: 1,
            weekdays: NO_DAYS,
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2023-01-31T08:00:00",
            expected: "2023-02-28T08:00:00",
        },
        OccurrenceCase {
            name: "yearly_leap_day_clamp",
            kind: RecurrenceKind::Yearly,
            period: 1,
            weekdays: NO_DAYS,
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2024-02-29T12:00:00",
            expected: "2025-02-28T12:00:00",
        },
        OccurrenceCase {
            name: "none_keeps_reference",
            kind: RecurrenceKind::None,
            period: 1,
            weekdays: NO_DAYS,
            completion_relative: false,
            today: FAR_AWAY,
            reference: "2024-04-01T09:15:00",
            expected: "2024-04-01T09:15:00",
        },
        OccurrenceCase {
            name: "completion_relative_weekly_from_today",
            kind: RecurrenceKind::Weekly,
            period: 1,
            weekdays: &[0, 2, 4],
            completion_relative: true,
            today: "2024-01-05",
            reference: "2023-06-01T18:00:00",
            expected: "2024-01-08T00:00:00",
        },
        OccurrenceCase {
            name: "completion_relative_monthly_from_today",
            kind: RecurrenceKind::Monthly,
            period: 2,
            weekdays: NO_DAYS,
            completion_relative: true,
            today: "2024-12-31",
            reference: "2024-01-01T10:00:00",
            expected: "2025-02-28T00:00:00",
        },
    ]
}

pub fn assert_case(case: &OccurrenceCase) {
    let rule = RecurrenceRule::new(case.kind)
        .with_period(case.period)
        .unwrap_or_else(|err| panic!("{}: invalid period: {err}", case.name))
        .with_completion_relative(case.completion_relative)
        .with_weekdays(WeekdaySet::from_indices(case.weekdays.iter().copied()));

    let today = case
        .today
        .parse::<NaiveDate>()
        .unwrap_or_else(|err| panic!("{}: bad today: {err}", case.name));
    let reference = case
        .reference
        .parse::<NaiveDateTime>()
        .unwrap_or_else(|err| panic!("{}: bad reference: {err}", case.name));
    let expected = case
        .expected
        .parse::<NaiveDateTime>()
        .unwrap_or_else(|err| panic!("{}: bad expected: {err}", case.name));

    let actual = next_occurrence(&rule, reference, &FixedClock::on(today))
        .unwrap_or_else(|err| panic!("{}: evaluation failed: {err}", case.name));

    assert_eq!(actual, expected, "case {} ({rule})", case.name);
}
