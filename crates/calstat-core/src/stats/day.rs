//! Day-of-week distribution.

use chrono::{Datelike, Weekday};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::ByPattern;
use crate::analysis::AnalysisResult;

/// Canonical English weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Events and hours that fell on one weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DayBucket {
    pub count: usize,
    pub total_hours: f64,
    /// `total_hours / count`, or 0 for an empty bucket.
    pub avg_hours: f64,
}

/// Seven weekday buckets, Monday first.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayDistribution {
    days: [DayBucket; 7],
}

impl DayDistribution {
    /// Returns the bucket for `weekday`.
    pub fn get(&self, weekday: Weekday) -> &DayBucket {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    /// Iterates `(weekday name, bucket)` from Monday to Sunday.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &DayBucket)> {
        WEEKDAY_NAMES.iter().copied().zip(self.days.iter())
    }

    /// Sum of counts across all weekdays.
    pub fn total_count(&self) -> usize {
        self.days.iter().map(|d| d.count).sum()
    }
}

impl Serialize for DayDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (name, bucket) in self.iter() {
            map.serialize_entry(name, bucket)?;
        }
        map.end()
    }
}

/// Pattern to weekday distribution.
pub type DayStats = ByPattern<DayDistribution>;

/// Buckets every matched event by the weekday of its start.
pub fn day_distribution(result: &AnalysisResult) -> DayStats {
    result
        .iter()
        .map(|(pattern, events)| {
            let mut dist = DayDistribution::default();
            for event in events {
                let bucket = &mut dist.days[event.start.weekday().num_days_from_monday() as usize];
                bucket.count += 1;
                bucket.total_hours += event.hours();
            }
            for bucket in &mut dist.days {
                if bucket.count > 0 {
                    bucket.avg_hours = bucket.total_hours / bucket.count as f64;
                }
            }
            (pattern.to_string(), dist)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::*;

    #[test]
    fn buckets_by_local_weekday() {
        // 2024-12-09 is a Monday.
        let result = result(vec![(
            "meetings",
            vec![
                event(la(2024, 12, 9, 9, 0), "Standup", 30),
                event(la(2024, 12, 9, 14, 0), "Planning", 90),
                event(la(2024, 12, 11, 9, 0), "Standup", 30),
                event(la(2024, 12, 15, 23, 30), "Late sync", 60),
            ],
        )]);

        let stats = day_distribution(&result);
        let dist = stats.get("meetings").unwrap();

        let monday = dist.get(Weekday::Mon);
        assert_eq!(monday.count, 2);
        assert!(approx(monday.total_hours, 2.0));
        assert!(approx(monday.avg_hours, 1.0));

        assert_eq!(dist.get(Weekday::Wed).count, 1);
        assert!(approx(dist.get(Weekday::Wed).avg_hours, 0.5));
        assert_eq!(dist.get(Weekday::Sun).count, 1);

        let tuesday = dist.get(Weekday::Tue);
        assert_eq!(tuesday.count, 0);
        assert_eq!(tuesday.avg_hours, 0.0);
    }

    #[test]
    fn counts_sum_to_event_total() {
        let events: Vec<_> = (1..=20)
            .map(|d| event(la(2024, 7, d, 10, 0), "Workout", 45))
            .collect();
        let result = result(vec![("workout", events)]);

        let stats = day_distribution(&result);
        assert_eq!(stats.get("workout").unwrap().total_count(), 20);
    }

    #[test]
    fn empty_pattern_has_seven_zero_buckets() {
        let stats = day_distribution(&result(vec![("social", vec![])]));
        let dist = stats.get("social").unwrap();

        let names: Vec<_> = dist.iter().map(|(name, _)| name).collect();
        assert_eq!(names, WEEKDAY_NAMES.to_vec());
        assert!(dist.iter().all(|(_, b)| *b == DayBucket::default()));
    }

    #[test]
    fn zero_duration_events_count_without_hours() {
        let stats = day_distribution(&result(vec![(
            "meetings",
            vec![event(la(2024, 1, 15, 0, 0), "All Day Meeting", 0)],
        )]));
        let monday = *stats.get("meetings").unwrap().get(Weekday::Mon);
        assert_eq!(monday.count, 1);
        assert_eq!(monday.total_hours, 0.0);
        assert_eq!(monday.avg_hours, 0.0);
    }

    #[test]
    fn serializes_weekdays_in_order() {
        let stats = day_distribution(&result(vec![("social", vec![])]));
        let json = serde_json::to_string(&stats).unwrap();
        let monday = json.find("Monday").unwrap();
        let sunday = json.find("Sunday").unwrap();
        assert!(monday < sunday);
        assert!(json.starts_with(r#"{"social":{"Monday":{"count":0"#));
    }
}
