//! Total time spent per pattern.

use chrono::Duration;
use serde::{Serialize, Serializer};

use super::ByPattern;
use crate::analysis::{AnalysisResult, duration_hours};

fn serialize_hours<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration_hours(*duration))
}

/// Summed duration of a pattern's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternTime {
    #[serde(rename = "hours", serialize_with = "serialize_hours")]
    pub total: Duration,
    pub events: usize,
}

impl Default for PatternTime {
    fn default() -> Self {
        Self {
            total: Duration::zero(),
            events: 0,
        }
    }
}

impl PatternTime {
    /// Total as fractional hours.
    pub fn hours(&self) -> f64 {
        duration_hours(self.total)
    }
}

/// Pattern to total time.
pub type TimeSpent = ByPattern<PatternTime>;

/// Sums the durations of every pattern's events.
pub fn time_spent(result: &AnalysisResult) -> TimeSpent {
    result
        .iter()
        .map(|(pattern, events)| {
            let total = events
                .iter()
                .fold(Duration::zero(), |acc, e| acc + e.duration);
            (
                pattern.to_string(),
                PatternTime {
                    total,
                    events: events.len(),
                },
            )
        })
        .collect()
}
