//! Weekly totals, keyed by the Monday that starts each week.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::ByPattern;
use crate::analysis::AnalysisResult;

/// Hours spent during one Monday-to-Sunday week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeekBucket {
    pub total_hours: f64,
    /// `total_hours / 7`.
    pub avg_hours: f64,
    pub event_count: usize,
}

/// Pattern to week-start date to bucket.
///
/// Keys serialize as `YYYY-MM-DD`.
pub type WeeklyStats = ByPattern<BTreeMap<NaiveDate, WeekBucket>>;

/// Returns the Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Groups every pattern's events by the week their local start falls in.
pub fn weekly_stats(result: &AnalysisResult) -> WeeklyStats {
    result
        .iter()
        .map(|(pattern, events)| {
            let mut weeks: BTreeMap<NaiveDate, WeekBucket> = BTreeMap::new();
            for event in events {
                let bucket = weeks
                    .entry(week_start(event.start.date_naive()))
                    .or_default();
                bucket.total_hours += event.hours();
                bucket.event_count += 1;
            }
            for bucket in weeks.values_mut() {
                bucket.avg_hours = bucket.total_hours / 7.0;
            }
            (pattern.to_string(), weeks)
        })
        .collect()
}
