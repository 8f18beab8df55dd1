use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use super::views::{GrowthRates, TrendPoint};
use crate::workflows::admissions::domain::{parse_optional_timestamp, PlatformSnapshot};

/// Inclusive time bucket with its display label.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrendWindow {
    pub(crate) start: DateTime<Utc>,
    pub(crate) end: DateTime<Utc>,
    pub(crate) label: String,
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Generate the report buckets for a window, oldest first. Bucket width
/// follows the window size: up to a week is daily, up to a month is weekly
/// (Monday-aligned), up to a quarter is three calendar months, anything
/// longer is six. The most recent bucket always ends at `now`, not at the
/// end of its period.
pub(crate) fn trend_windows(window_days: i64, now: DateTime<Utc>) -> Vec<TrendWindow> {
    if window_days <= 7 {
        // Seven daily buckets regardless of the exact window size.
        (0..7)
            .rev()
            .map(|i| {
                let day = (now - Duration::days(i)).date_naive();
                let start = start_of_day(day);
                TrendWindow {
                    start,
                    end: start + Duration::days(1) - Duration::microseconds(1),
                    label: day.format("%m/%d").to_string(),
                }
            })
            .collect()
    } else if window_days <= 30 {
        let periods = window_days / 7;
        (0..periods)
            .rev()
            .map(|i| {
                let period_day = (now - Duration::weeks(i)).date_naive();
                let monday =
                    period_day - Duration::days(i64::from(period_day.weekday().num_days_from_monday()));
                let start = start_of_day(monday);
                TrendWindow {
                    start,
                    end: start + Duration::days(7) - Duration::seconds(1),
                    label: start.format("W%W").to_string(),
                }
            })
            .collect()
    } else {
        let periods = if window_days <= 90 { 3 } else { 6 };
        (0..periods)
            .rev()
            .map(|i| {
                let period_day = (now - Duration::days(30 * i)).date_naive();
                let start = start_of_day(first_of_month(period_day));
                let end = if i == 0 {
                    now
                } else {
                    let next_first = first_of_month((start + Duration::days(32)).date_naive());
                    start_of_day(next_first) - Duration::seconds(1)
                };
                TrendWindow {
                    start,
                    end,
                    label: period_day.format("%b").to_string(),
                }
            })
            .collect()
    }
}

/// Count registrations, applications, and consultations per bucket. Counts
/// draw from the unfiltered collections; records without a parseable
/// creation timestamp are skipped.
pub(crate) fn trend_series(
    snapshot: &PlatformSnapshot,
    window_days: i64,
    now: DateTime<Utc>,
) -> Vec<TrendPoint> {
    trend_windows(window_days, now)
        .into_iter()
        .map(|window| {
            let TrendWindow { start, end, label } = window;
            let in_window = |created_at: &Option<String>| {
                parse_optional_timestamp(created_at).is_some_and(|at| start <= at && at <= end)
            };

            let students = snapshot
                .users
                .iter()
                .filter(|user| user.is_student() && in_window(&user.created_at))
                .count() as u64;
            let applications = snapshot
                .applications
                .iter()
                .filter(|application| in_window(&application.created_at))
                .count() as u64;
            let consultations = snapshot
                .consultations
                .iter()
                .filter(|consultation| in_window(&consultation.created_at))
                .count() as u64;

            TrendPoint {
                month: label,
                students,
                applications,
                consultations,
            }
        })
        .collect()
}

fn period_change(current: u64, previous: u64) -> f64 {
    if previous > 0 {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    } else {
        0.0
    }
}

/// Growth between the two most recent buckets, one decimal place. A zero or
/// absent prior bucket reports 0 rather than an undefined rate.
pub(crate) fn growth_rates(trends: &[TrendPoint]) -> GrowthRates {
    let current = trends.last();
    let previous = trends.len().checked_sub(2).and_then(|i| trends.get(i));

    let (students, applications, consultations) = match (current, previous) {
        (Some(current), Some(previous)) => (
            period_change(current.students, previous.students),
            period_change(current.applications, previous.applications),
            period_change(current.consultations, previous.consultations),
        ),
        _ => (0.0, 0.0, 0.0),
    };

    GrowthRates {
        students: super::round1(students),
        applications: super::round1(applications),
        // Proxy: documents have no trend series of their own yet, so their
        // growth figure reuses the application series.
        documents: super::round1(applications),
        consultations: super::round1(consultations),
    }
}
