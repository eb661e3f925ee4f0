//! Dense synthetic timeline derived from recording intervals.

use super::accumulator::TimingTable;
use chrono::NaiveDateTime;

/// Expand every interval into evenly spaced instants at `rate` points/second.
///
/// Each interval contributes `floor(seconds * rate)` points spanning both of
/// its endpoints, as epoch seconds. Intervals yielding one point or fewer are
/// skipped. Points are concatenated in table order.
pub fn sample_timeline(timings: &TimingTable, rate: f64) -> Vec<f64> {
    let mut samples = Vec::new();

    for row in timings {
        let span = interval_seconds(row.start_time, row.end_time) * rate;
        if !span.is_finite() || span < 2.0 {
            continue;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = span.floor() as usize;

        samples.extend(linspace(
            epoch_seconds(row.start_time),
            epoch_seconds(row.end_time),
            n,
        ));
    }

    samples
}

/// `n` evenly spaced values from `start` to `end` inclusive, `n >= 2`.
fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    #[allow(clippy::cast_precision_loss)]
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(move |i| {
        if i == n - 1 {
            end
        } else {
            #[allow(clippy::cast_precision_loss)]
            let offset = step * i as f64;
            start + offset
        }
    })
}

/// Length of `[start, end]` in seconds, at microsecond resolution.
#[allow(clippy::cast_precision_loss)]
fn interval_seconds(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta = end - start;
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 1e3,
        |us| us as f64 / 1e6,
    )
}

/// Seconds since the Unix epoch, reading the naive time as UTC.
pub fn epoch_seconds(t: NaiveDateTime) -> f64 {
    let utc = t.and_utc();
    #[allow(clippy::cast_precision_loss)]
    let secs = utc.timestamp() as f64;
    secs + f64::from(utc.timestamp_subsec_micros()) / 1e6
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::pipeline::TimingRow;
    use chrono::{NaiveDate, TimeDelta};

    fn interval(start_secs: i64, millis: i64) -> TimingRow {
        let start = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            + TimeDelta::seconds(start_secs);
        TimingRow {
            start_time: start,
            end_time: start + TimeDelta::milliseconds(millis),
            fname: "x.edf".to_string(),
            folder_name: "p".to_string(),
        }
    }

    fn table(rows: Vec<TimingRow>) -> TimingTable {
        rows.into_iter().collect()
    }

    #[test]
    fn test_zero_length_interval_gives_no_points() {
        assert!(sample_timeline(&table(vec![interval(0, 0)]), 10.0).is_empty());
    }

    #[test]
    fn test_single_point_boundary_is_skipped() {
        // 1 s at 1 Hz -> exactly one sample -> degenerate
        assert!(sample_timeline(&table(vec![interval(0, 1000)]), 1.0).is_empty());
        // 2 s at 1 Hz -> two samples, both endpoints
        let points = sample_timeline(&table(vec![interval(0, 2000)]), 1.0);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_points_span_both_endpoints() {
        let row = interval(0, 10_000);
        let start = epoch_seconds(row.start_time);
        let end = epoch_seconds(row.end_time);

        let points = sample_timeline(&table(vec![row]), 10.0);

        assert_eq!(points.len(), 100);
        assert_eq!(points[0], start);
        assert_eq!(points[99], end);
        assert!(points.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_fractional_span_floors() {
        // 2.55 s at 10 Hz -> 25.5 -> 25 points
        assert_eq!(sample_timeline(&table(vec![interval(0, 2550)]), 10.0).len(), 25);
    }

    #[test]
    fn test_rows_concatenate_in_table_order() {
        let late = interval(3600, 1000);
        let early = interval(0, 1000);
        let late_start = epoch_seconds(late.start_time);

        let points = sample_timeline(&table(vec![late, interval(10, 0), early]), 5.0);

        assert_eq!(points.len(), 10);
        assert_eq!(points[0], late_start);
        assert!(points[5] < late_start);
    }

    #[test]
    fn test_recompute_is_identical() {
        let t = table(vec![interval(0, 3000), interval(100, 1500)]);
        assert_eq!(sample_timeline(&t, 4.0), sample_timeline(&t, 4.0));
    }

    #[test]
    fn test_epoch_seconds_keeps_subseconds() {
        let t = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_micro_opt(0, 0, 1, 250_000)
            .unwrap();
        assert_eq!(epoch_seconds(t), 1.25);
    }
}
