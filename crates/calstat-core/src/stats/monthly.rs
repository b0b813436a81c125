//! Monthly totals with a per-week average.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use super::ByPattern;
use crate::analysis::AnalysisResult;

/// A calendar month. Orders chronologically and displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Number of days in the month (28 to 31).
    pub fn days(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        match (
            NaiveDate::from_ymd_opt(self.year, self.month, 1),
            NaiveDate::from_ymd_opt(next_year, next_month, 1),
        ) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            // Only reachable for out-of-range years.
            _ => 30,
        }
    }

    /// Fractional number of weeks in the month.
    pub fn weeks(&self) -> f64 {
        f64::from(self.days()) / 7.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hours and events in one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthBucket {
    pub total_hours: f64,
    /// Average hours per week: `total_hours / (days_in_month / 7)`.
    pub avg_hours: f64,
    pub event_count: usize,
}

/// Pattern to month to bucket.
pub type MonthlyStats = ByPattern<BTreeMap<MonthKey, MonthBucket>>;

/// Groups every pattern's events by the month their local start falls in.
pub fn monthly_stats(result: &AnalysisResult) -> MonthlyStats {
    result
        .iter()
        .map(|(pattern, events)| {
            let mut months: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
            for event in events {
                let bucket = months
                    .entry(MonthKey::of(event.start.date_naive()))
                    .or_default();
                bucket.total_hours += event.hours();
                bucket.event_count += 1;
            }
            for (key, bucket) in months.iter_mut() {
                bucket.avg_hours = bucket.total_hours / key.weeks();
            }
            (pattern.to_string(), months)
        })
        .collect()
}
