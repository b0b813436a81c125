//! Aggregate statistics over an [`AnalysisResult`].
//!
//! Every aggregator is a pure function of the analysis result: nothing is
//! re-matched and the input is never mutated.
//!
//! - [`day_distribution`]: count and hours per weekday
//! - [`time_spent`]: total duration per pattern
//! - [`weekly_stats`]: hours per ISO week (keyed by its Monday)
//! - [`monthly_stats`]: hours and counts per calendar month
//! - [`find_overlaps`]: pairs of matched events whose intervals intersect
//!
//! [`Report`] bundles all of them for a single rendering pass.
//!
//! [`AnalysisResult`]: crate::analysis::AnalysisResult

mod day;
mod monthly;
mod overlap;
mod report;
mod spent;
mod weekly;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use day::{DayBucket, DayDistribution, DayStats, WEEKDAY_NAMES, day_distribution};
pub use monthly::{MonthBucket, MonthKey, MonthlyStats, monthly_stats};
pub use overlap::{OverlapRecord, find_overlaps};
pub use report::Report;
pub use spent::{PatternTime, TimeSpent, time_spent};
pub use weekly::{WeekBucket, WeeklyStats, week_start, weekly_stats};

/// Per-pattern values, kept in pattern-set order.
///
/// Serializes as a JSON object keyed by pattern name.
#[derive(Debug, Clone, PartialEq)]
pub struct ByPattern<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for ByPattern<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ByPattern<T> {
    pub(crate) fn push(&mut self, pattern: impl Into<String>, value: T) {
        self.entries.push((pattern.into(), value));
    }

    /// Returns the value for `pattern`.
    pub fn get(&self, pattern: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(name, _)| name == pattern)
            .map(|(_, value)| value)
    }

    /// Iterates `(pattern, value)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no patterns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for ByPattern<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T: Serialize> Serialize for ByPattern<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Duration, TimeZone};
    use chrono_tz::Tz;

    use crate::analysis::{AnalysisResult, MatchedEvent};
    use crate::time::DEFAULT_TIMEZONE;

    pub fn la(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        DEFAULT_TIMEZONE
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    pub fn event(start: DateTime<Tz>, summary: &str, minutes: i64) -> MatchedEvent {
        MatchedEvent::new(start, summary, Duration::minutes(minutes))
    }

    /// Builds a result from `(pattern, events)` groups.
    pub fn result(groups: Vec<(&str, Vec<MatchedEvent>)>) -> AnalysisResult {
        let mut result = AnalysisResult::new(groups.iter().map(|(name, _)| *name));
        for (name, events) in groups {
            for e in events {
                result.push(name, e);
            }
        }
        result
    }

    pub fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
}
