//! Time-bucketed aggregation of money values for the dashboard charts.
//!
//! Records are filtered to the selected period's window, grouped into buckets
//! named by their chart label, summed, and put in chronological order.

use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    label::{format_label, parse_label},
    period::{Period, Window, local_date},
    record::{Entry, TimestampedAmount, parse_record_date},
};

/// One bucket of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// The bucket label, used verbatim as the X axis category.
    pub label: String,
    /// The unrounded sum of the bucket's amounts.
    pub value: f64,
}

impl ChartPoint {
    /// Create a chart point.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Aggregates `records` into a chronologically sorted chart series.
///
/// Only records dated inside `period`'s window at `now` are counted. Calendar
/// days are those of the timezone given by `local_offset`. Records with
/// unparseable dates are skipped.
///
/// The sum of the returned values equals the sum of the counted amounts.
/// This function never fails; an empty window gives an empty series.
pub fn aggregate_for_chart(
    records: &[TimestampedAmount],
    period: Period,
    now: OffsetDateTime,
    local_offset: UtcOffset,
) -> Vec<ChartPoint> {
    let window = period.window(now, local_offset);
    let totals = aggregate_by_label(records, period, window, local_offset);

    let points = totals
        .into_iter()
        .map(|(label, value)| ChartPoint { label, value })
        .collect();

    let current_year = local_date(now, local_offset).year();
    sort_chart_points(points, period, current_year)
}

/// Sums the amounts of the records inside `window`, keyed by bucket label.
pub fn aggregate_by_label(
    records: &[TimestampedAmount],
    period: Period,
    window: Window,
    local_offset: UtcOffset,
) -> HashMap<String, f64> {
    let mut totals = HashMap::new();

    for record in records {
        let Some(instant) = parse_in_window(record, window, local_offset) else {
            continue;
        };

        let label = format_label(instant.date(), period);
        *totals.entry(label).or_insert(0.0) += record.amount;
    }

    totals
}

/// Keeps the entries dated inside `window`.
///
/// Entries with unparseable dates, or dates that cannot be expressed at
/// `local_offset`, are treated as outside every window.
pub fn filter_to_window<'a, E: Entry>(
    entries: &'a [E],
    window: Window,
    local_offset: UtcOffset,
) -> Vec<&'a E> {
    entries
        .iter()
        .filter(|entry| parse_in_window(*entry, window, local_offset).is_some())
        .collect()
}

/// Sums the amounts of the entries dated inside `window`.
pub fn total_in_window<E: Entry>(entries: &[E], window: Window, local_offset: UtcOffset) -> f64 {
    filter_to_window(entries, window, local_offset)
        .into_iter()
        .map(Entry::amount)
        .sum()
}

fn parse_in_window(
    entry: &impl Entry,
    window: Window,
    local_offset: UtcOffset,
) -> Option<OffsetDateTime> {
    let Some(instant) = parse_record_date(entry.date(), local_offset) else {
        tracing::debug!("Skipping record with unparseable date {:?}", entry.date());
        return None;
    };

    if !window.contains(instant) {
        return None;
    }

    // The returned instant is in local time, ready for bucketing.
    let local = instant.checked_to_offset(local_offset);
    if local.is_none() {
        tracing::debug!(
            "Skipping record with date {:?} outside the supported range at {local_offset}",
            entry.date()
        );
    }

    local
}

/// Orders chart points chronologically by parsing their labels back into dates.
///
/// When either label of a pair cannot be parsed, that pair is ordered by
/// comparing the labels as strings. The sort is stable and completes for any
/// input, even when the mixed comparisons are not consistent with each other.
pub fn sort_chart_points(
    points: Vec<ChartPoint>,
    period: Period,
    current_year: i32,
) -> Vec<ChartPoint> {
    merge_sort_by(points, &|a: &ChartPoint, b: &ChartPoint| {
        compare_labels(&a.label, &b.label, period, current_year)
    })
}

/// Compares two bucket labels of the same period chronologically, falling back
/// to string order.
pub fn compare_labels(a: &str, b: &str, period: Period, current_year: i32) -> Ordering {
    match (
        parse_label(a, period, current_year),
        parse_label(b, period, current_year),
    ) {
        (Some(date_a), Some(date_b)) => date_a.cmp(&date_b).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

// `slice::sort_by` may panic when the comparison is not a total order, which
// the string fallback cannot guarantee.
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let next = if compare(r, l) == Ordering::Less {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use time::{
        Duration,
        macros::{datetime, offset},
    };

    use super::{
        ChartPoint, aggregate_for_chart, compare_labels, filter_to_window, merge_sort_by,
        sort_chart_points, total_in_window,
    };
    use crate::{
        period::{PERIODS, Period},
        record::TimestampedAmount,
    };

    fn labels(points: &[ChartPoint]) -> Vec<&str> {
        points.iter().map(|point| point.label.as_str()).collect()
    }

    fn sum(points: &[ChartPoint]) -> f64 {
        points.iter().map(|point| point.value).sum()
    }

    #[test]
    fn monthly_buckets_are_in_calendar_order() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![
            TimestampedAmount::new("2024-03-15T10:00:00Z", 15.0),
            TimestampedAmount::new("2024-03-01T10:00:00Z", 1.0),
            TimestampedAmount::new("2024-03-05T10:00:00Z", 5.0),
        ];

        let points = aggregate_for_chart(&records, Period::Monthly, now, offset!(UTC));

        assert_eq!(labels(&points), vec!["01 mar", "05 mar", "15 mar"]);
        assert_eq!(
            points.iter().map(|point| point.value).collect::<Vec<_>>(),
            vec![1.0, 5.0, 15.0]
        );
    }

    #[test]
    fn order_does_not_depend_on_input_order() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let mut records = vec![
            TimestampedAmount::new("2024-03-01T10:00:00Z", 1.0),
            TimestampedAmount::new("2024-03-05T10:00:00Z", 5.0),
            TimestampedAmount::new("2024-03-15T10:00:00Z", 15.0),
        ];
        let expected = aggregate_for_chart(&records, Period::Monthly, now, offset!(UTC));

        records.reverse();
        let reversed = aggregate_for_chart(&records, Period::Monthly, now, offset!(UTC));

        assert_eq!(reversed, expected);
    }

    #[test]
    fn empty_input_gives_empty_output_for_every_period() {
        let now = datetime!(2024-03-20 12:00 UTC);

        for period in PERIODS {
            assert!(aggregate_for_chart(&[], period, now, offset!(UTC)).is_empty());
        }
    }

    #[test]
    fn empty_window_gives_empty_output() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![TimestampedAmount::new("2024-02-28T10:00:00Z", 10.0)];

        let points = aggregate_for_chart(&records, Period::Monthly, now, offset!(UTC));

        assert!(points.is_empty());
    }

    #[test]
    fn daily_window_includes_midnight_and_excludes_the_millisecond_before() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let midnight = datetime!(2024-03-20 0:00 UTC);
        let just_before = midnight - Duration::milliseconds(1);
        let records = vec![
            TimestampedAmount::new("2024-03-20T00:00:00.000Z", 10.0),
            TimestampedAmount::new(rfc3339(just_before), 99.0),
        ];

        let points = aggregate_for_chart(&records, Period::Daily, now, offset!(UTC));

        assert_eq!(points, vec![ChartPoint::new("20/03/24", 10.0)]);
    }

    fn rfc3339(date_time: time::OffsetDateTime) -> String {
        date_time
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap()
    }

    #[test]
    fn weekly_groups_tuesday_and_thursday_into_one_bucket() {
        // Sunday 2024-03-17, Tuesday the 19th and Thursday the 21st.
        let now = datetime!(2024-03-22 12:00 UTC);
        let records = vec![
            TimestampedAmount::new("2024-03-19T10:00:00Z", 30.0),
            TimestampedAmount::new("2024-03-21T18:00:00Z", 12.5),
        ];

        let points = aggregate_for_chart(&records, Period::Weekly, now, offset!(UTC));

        assert_eq!(points, vec![ChartPoint::new("Sem 17/03", 42.5)]);
    }

    #[test]
    fn all_time_groups_by_month_across_years() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![
            TimestampedAmount::new("2024-01-15T10:00:00Z", 3.0),
            TimestampedAmount::new("2023-11-10T10:00:00Z", 1.0),
            TimestampedAmount::new("2023-12-01T10:00:00Z", 2.0),
            TimestampedAmount::new("2023-11-25T10:00:00Z", 4.0),
        ];

        let points = aggregate_for_chart(&records, Period::All, now, offset!(UTC));

        assert_eq!(
            points,
            vec![
                ChartPoint::new("nov/23", 5.0),
                ChartPoint::new("dez/23", 2.0),
                ChartPoint::new("jan/24", 3.0),
            ]
        );
    }

    #[test]
    fn daily_buckets_sort_across_years() {
        let now = datetime!(2024-01-02 12:00 UTC);
        let points = vec![
            ChartPoint::new("01/01/24", 1.0),
            ChartPoint::new("31/12/23", 2.0),
            ChartPoint::new("02/01/24", 3.0),
        ];

        let sorted = sort_chart_points(points, Period::Daily, now.year());

        assert_eq!(labels(&sorted), vec!["31/12/23", "01/01/24", "02/01/24"]);
    }

    #[test]
    fn buckets_use_the_local_calendar_day() {
        // 02:00 UTC on the 6th is 23:00 on the 5th in São Paulo.
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![TimestampedAmount::new("2024-03-06T02:00:00Z", 7.0)];

        let points = aggregate_for_chart(&records, Period::Monthly, now, offset!(-3));

        assert_eq!(points, vec![ChartPoint::new("05 mar", 7.0)]);
    }

    #[test]
    fn unparseable_dates_are_skipped() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![
            TimestampedAmount::new("not a date", 1000.0),
            TimestampedAmount::new("2024-03-10T10:00:00Z", 10.0),
        ];

        for period in [Period::Monthly, Period::All] {
            let points = aggregate_for_chart(&records, period, now, offset!(UTC));
            assert_eq!(sum(&points), 10.0);
        }
    }

    #[test]
    fn dates_that_overflow_the_local_offset_are_skipped() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![
            TimestampedAmount::new("9999-12-31T23:00:00Z", 5.0),
            TimestampedAmount::new("2024-03-10T10:00:00Z", 10.0),
        ];
        let window = Period::All.window(now, offset!(+9));

        let points = aggregate_for_chart(&records, Period::All, now, offset!(+9));

        assert_eq!(points, vec![ChartPoint::new("mar/24", 10.0)]);
        assert_eq!(total_in_window(&records, window, offset!(+9)), 10.0);
    }

    #[test]
    fn now_at_the_end_of_the_date_range_does_not_panic() {
        let now = datetime!(9999-12-31 23:00 UTC);
        let records = vec![TimestampedAmount::new("2024-03-10T10:00:00Z", 10.0)];

        let points = aggregate_for_chart(&records, Period::All, now, offset!(+9));

        assert_eq!(points, vec![ChartPoint::new("mar/24", 10.0)]);
    }

    #[test]
    fn huge_years_in_labels_fall_back_to_string_order() {
        let points = vec![
            ChartPoint::new("01/01/2147483647", 1.0),
            ChartPoint::new("05/03/24", 2.0),
        ];

        let sorted = sort_chart_points(points, Period::Daily, 2024);

        assert_eq!(labels(&sorted), vec!["01/01/2147483647", "05/03/24"]);
        assert_eq!(
            compare_labels("mar/2147483647", "fev/24", Period::All, 2024),
            "mar/2147483647".cmp("fev/24")
        );
    }

    #[test]
    fn weekly_labels_across_new_year_sort_within_the_current_year() {
        // Labels carry no year, so the week of Sunday 29/12/2024 is read back
        // as December 2025 and lands after the first week of January. This is
        // the dashboard's long-standing behaviour and is kept on purpose.
        let points = vec![
            ChartPoint::new("Sem 29/12", 1.0),
            ChartPoint::new("Sem 05/01", 2.0),
        ];

        let sorted = sort_chart_points(points, Period::Weekly, 2025);

        assert_eq!(labels(&sorted), vec!["Sem 05/01", "Sem 29/12"]);
    }

    #[test]
    fn monthly_labels_across_new_year_sort_within_the_current_year() {
        // Kept on purpose, like the weekly case.
        let points = vec![
            ChartPoint::new("31 dez", 1.0),
            ChartPoint::new("01 jan", 2.0),
        ];

        let sorted = sort_chart_points(points, Period::Monthly, 2025);

        assert_eq!(labels(&sorted), vec!["01 jan", "31 dez"]);
    }

    #[test]
    fn negative_amounts_are_summed_as_is() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![
            TimestampedAmount::new("2024-03-10T10:00:00Z", 10.0),
            TimestampedAmount::new("2024-03-10T11:00:00Z", -4.0),
        ];

        let points = aggregate_for_chart(&records, Period::Monthly, now, offset!(UTC));

        assert_eq!(points, vec![ChartPoint::new("10 mar", 6.0)]);
    }

    #[test]
    fn chart_total_equals_total_in_window() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![
            TimestampedAmount::new("2023-06-01T10:00:00Z", 1.0),
            TimestampedAmount::new("2024-02-29T23:59:59Z", 2.0),
            TimestampedAmount::new("2024-03-01T00:00:00Z", 4.0),
            TimestampedAmount::new("2024-03-16T08:00:00Z", 8.0),
            TimestampedAmount::new("2024-03-17T08:00:00Z", 16.0),
            TimestampedAmount::new("2024-03-20T00:00:00Z", 32.0),
            TimestampedAmount::new("2024-03-20T22:00:00Z", 64.0),
            TimestampedAmount::new("2024-04-02T08:00:00Z", 128.0),
            TimestampedAmount::new("garbage", 256.0),
        ];

        for (period, expected) in [
            (Period::Daily, 224.0),
            (Period::Weekly, 240.0),
            (Period::Monthly, 252.0),
            (Period::All, 255.0),
        ] {
            let window = period.window(now, offset!(UTC));
            let points = aggregate_for_chart(&records, period, now, offset!(UTC));

            assert_eq!(sum(&points), expected, "{period:?}");
            assert_eq!(total_in_window(&records, window, offset!(UTC)), expected);
        }
    }

    #[test]
    fn filter_to_window_keeps_entries_from_the_start_onwards() {
        let now = datetime!(2024-03-20 12:00 UTC);
        let records = vec![
            TimestampedAmount::new("2024-02-29T23:59:59Z", 1.0),
            TimestampedAmount::new("2024-03-01", 2.0),
        ];
        let window = Period::Monthly.window(now, offset!(UTC));

        let kept = filter_to_window(&records, window, offset!(UTC));

        assert_eq!(kept, vec![&records[1]]);
    }

    #[test]
    fn malformed_labels_fall_back_to_string_order() {
        assert_eq!(
            compare_labels("??", "05 mar", Period::Monthly, 2024),
            "??".cmp("05 mar")
        );
        assert_eq!(
            compare_labels("10 mar", "9 zzz", Period::Monthly, 2024),
            Ordering::Less
        );
    }

    #[test]
    fn sorting_with_malformed_labels_completes() {
        let points = vec![
            ChartPoint::new("15 mar", 1.0),
            ChartPoint::new("zzz", 2.0),
            ChartPoint::new("01 mar", 3.0),
            ChartPoint::new("Invalid Date", 4.0),
            ChartPoint::new("05 mar", 5.0),
            ChartPoint::new("", 6.0),
        ];

        let sorted = sort_chart_points(points.clone(), Period::Monthly, 2024);

        assert_eq!(sorted.len(), points.len());
        assert_eq!(sum(&sorted), sum(&points));

        let parsed: Vec<&str> = labels(&sorted)
            .into_iter()
            .filter(|label| label.ends_with(" mar"))
            .collect();
        assert_eq!(parsed, vec!["01 mar", "05 mar", "15 mar"]);
    }

    #[test]
    fn merge_sort_survives_an_inconsistent_comparison() {
        // Claims every pair is out of order.
        let sorted = merge_sort_by((0..100).collect(), &|_: &i32, _: &i32| Ordering::Less);

        let mut values = sorted;
        values.sort();
        assert_eq!(values, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn merge_sort_is_stable() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];

        let sorted = merge_sort_by(items, &|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));

        assert_eq!(sorted, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }
}
