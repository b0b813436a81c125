use serde::Serialize;

use super::{
    DayStats, MonthlyStats, OverlapRecord, TimeSpent, WeeklyStats, day_distribution,
    find_overlaps, monthly_stats, time_spent, weekly_stats,
};
use crate::analysis::AnalysisResult;

/// Every aggregate of one analysis, computed together for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub events: AnalysisResult,
    pub time_spent: TimeSpent,
    pub day_distribution: DayStats,
    pub monthly: MonthlyStats,
    pub weekly: WeeklyStats,
    pub overlaps: Vec<OverlapRecord>,
}

impl Report {
    pub fn build(result: &AnalysisResult) -> Self {
        Self {
            events: result.clone(),
            time_spent: time_spent(result),
            day_distribution: day_distribution(result),
            monthly: monthly_stats(result),
            weekly: weekly_stats(result),
            overlaps: find_overlaps(result),
        }
    }

    /// Returns true when no pattern matched anything.
    pub fn is_empty(&self) -> bool {
        self.events.total_matches() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::*;

    #[test]
    fn bundles_every_aggregate() {
        let result = result(vec![
            (
                "meetings",
                vec![
                    event(la(2024, 3, 4, 10, 0), "Meeting A", 60),
                    event(la(2024, 3, 4, 10, 30), "Meeting B", 60),
                ],
            ),
            ("workout", vec![]),
        ]);

        let report = Report::build(&result);
        assert!(!report.is_empty());
        assert_eq!(report.events, result);
        assert!(approx(report.time_spent.get("meetings").unwrap().hours(), 2.0));
        assert_eq!(report.day_distribution.get("meetings").unwrap().total_count(), 2);
        assert_eq!(report.monthly.len(), 2);
        assert_eq!(report.weekly.get("workout").map(|w| w.len()), Some(0));
        assert_eq!(report.overlaps.len(), 1);
    }

    #[test]
    fn json_has_all_sections() {
        let report = Report::build(&result(vec![("social", vec![])]));
        assert!(report.is_empty());

        let json = serde_json::to_value(&report).unwrap();
        let sections = [
            "events",
            "time_spent",
            "day_distribution",
            "monthly",
            "weekly",
            "overlaps",
        ];
        for section in sections {
            assert!(json.get(section).is_some(), "missing {section}");
        }
        assert_eq!(json["events"]["social"], serde_json::json!([]));
    }
}
