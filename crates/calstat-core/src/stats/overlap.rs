//! Overlap detection across all matched events.

use std::collections::HashSet;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::analysis::{AnalysisResult, MatchedEvent};

/// Two matched events whose intervals intersect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapRecord {
    /// Summary of the event that starts first.
    pub first: String,
    /// Summary of the event that starts second.
    pub second: String,
    /// The earlier of the two ends.
    pub overlap_end: DateTime<Tz>,
}

/// Finds every pair of matched events with `start_a < end_b && start_b < end_a`.
///
/// Events from all patterns are pooled. An event matched by several patterns
/// (same [`MatchedEvent::source_index`]) is pooled once; distinct events with
/// identical times and summaries are both kept. Touching intervals do not
/// overlap. Records are emitted in order of the later event's start.
pub fn find_overlaps(result: &AnalysisResult) -> Vec<OverlapRecord> {
    let mut seen = HashSet::new();
    let mut pooled: Vec<&MatchedEvent> = result
        .iter()
        .flat_map(|(_, events)| events)
        .filter(|event| event.source_index().is_none_or(|index| seen.insert(index)))
        .collect();
    pooled.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.summary.cmp(&b.summary))
            .then_with(|| a.duration.cmp(&b.duration))
    });

    let mut records = Vec::new();
    let mut active: Vec<&MatchedEvent> = Vec::new();
    for current in pooled {
        active.retain(|open| open.end() > current.start);
        for open in &active {
            if open.start < current.end() {
                records.push(OverlapRecord {
                    first: open.summary.clone(),
                    second: current.summary.clone(),
                    overlap_end: open.end().min(current.end()),
                });
            }
        }
        active.push(current);
    }

    debug!(overlaps = records.len(), "Overlap scan complete");
    records
}
