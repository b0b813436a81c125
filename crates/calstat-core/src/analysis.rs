//! Event analysis: normalize, window-filter and match raw events.
//!
//! [`analyze_events`] is the pure pipeline over a slice of raw events.
//! [`CalendarAnalyzer`] wraps a [`CalendarSource`], loading it on first use
//! and keeping the loaded events for the lifetime of the analyzer.

use std::cell::OnceCell;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::error::{AnalyzerResult, SourceError};
use crate::interval::{NormalizePolicy, normalize_event};
use crate::pattern::PatternSet;
use crate::raw_event::RawEvent;
use crate::source::CalendarSource;
use crate::time::{DEFAULT_TIMEZONE, TimeWindow, WindowPolicy};

/// Converts a duration to fractional hours.
pub fn duration_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}

fn serialize_hours<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration_hours(*duration))
}

/// One (pattern, event) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedEvent {
    /// Event start in the analysis timezone.
    pub start: DateTime<Tz>,
    /// Event summary (empty when the event has none).
    pub summary: String,
    /// Time spent; zero for all-day events.
    #[serde(rename = "duration_hours", serialize_with = "serialize_hours")]
    pub duration: Duration,
    /// Position of the raw event this match came from, when known.
    #[serde(skip)]
    source_index: Option<usize>,
}

impl MatchedEvent {
    pub fn new(start: DateTime<Tz>, summary: impl Into<String>, duration: Duration) -> Self {
        Self {
            start,
            summary: summary.into(),
            duration,
            source_index: None,
        }
    }

    /// Tags the match with the position of its raw event in the calendar.
    #[must_use]
    pub fn with_source_index(mut self, index: usize) -> Self {
        self.source_index = Some(index);
        self
    }

    /// Position of the originating raw event; identical for every pattern
    /// that matched the same event.
    pub fn source_index(&self) -> Option<usize> {
        self.source_index
    }

    /// `start + duration`.
    pub fn end(&self) -> DateTime<Tz> {
        self.start + self.duration
    }

    /// Duration as fractional hours.
    pub fn hours(&self) -> f64 {
        duration_hours(self.duration)
    }
}

/// The matched events of one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternEvents {
    pub pattern: String,
    pub events: Vec<MatchedEvent>,
}

/// Pattern name to matched events, in pattern-set order.
///
/// Every requested pattern has an entry, even when nothing matched.
/// Serializes as an object keyed by pattern name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    groups: Vec<PatternEvents>,
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.pattern, &group.events)?;
        }
        map.end()
    }
}

impl AnalysisResult {
    /// Creates a result with an empty list for every name.
    pub fn new<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            groups: names
                .into_iter()
                .map(|name| PatternEvents {
                    pattern: name.into(),
                    events: Vec::new(),
                })
                .collect(),
        }
    }

    /// Appends an event under `pattern`. Returns false for an unknown name.
    pub fn push(&mut self, pattern: &str, event: MatchedEvent) -> bool {
        match self.groups.iter_mut().find(|g| g.pattern == pattern) {
            Some(group) => {
                group.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Returns the events matched by `pattern`.
    pub fn get(&self, pattern: &str) -> Option<&[MatchedEvent]> {
        self.groups
            .iter()
            .find(|g| g.pattern == pattern)
            .map(|g| g.events.as_slice())
    }

    /// Iterates `(pattern, events)` in pattern-set order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatchedEvent])> {
        self.groups
            .iter()
            .map(|g| (g.pattern.as_str(), g.events.as_slice()))
    }

    /// Iterates pattern names in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.pattern.as_str())
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no pattern was requested.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of (pattern, event) pairings.
    pub fn total_matches(&self) -> usize {
        self.groups.iter().map(|g| g.events.len()).sum()
    }

    /// Stable-sorts each pattern's events by start.
    pub fn sort_by_start(&mut self) {
        for group in &mut self.groups {
            group.events.sort_by_key(|e| e.start);
        }
    }
}

/// Analyzer configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Timezone all intervals are expressed in.
    pub timezone: Tz,

    /// Which intervals the window keeps.
    pub window_policy: WindowPolicy,

    /// Defaulting rules for missing ends and all-day ends.
    pub normalize: NormalizePolicy,

    /// Whether each pattern's events are sorted chronologically.
    pub sort_by_start: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            window_policy: WindowPolicy::Overlap,
            normalize: NormalizePolicy::default(),
            sort_by_start: true,
        }
    }
}

impl AnalyzerConfig {
    /// Builder: set the analysis timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Builder: set the window policy.
    #[must_use]
    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    /// Builder: set the normalize policy.
    #[must_use]
    pub fn with_normalize_policy(mut self, policy: NormalizePolicy) -> Self {
        self.normalize = policy;
        self
    }

    /// Builder: set chronological sorting.
    #[must_use]
    pub fn with_sort_by_start(mut self, sort: bool) -> Self {
        self.sort_by_start = sort;
        self
    }
}

/// Normalizes, window-filters and matches `events` against `patterns`.
pub fn analyze_events(
    events: &[RawEvent],
    window: &TimeWindow,
    patterns: &PatternSet,
    config: &AnalyzerConfig,
) -> AnalysisResult {
    let mut result = AnalysisResult::new(patterns.names());
    let mut outside_window = 0usize;

    for (index, raw) in events.iter().enumerate() {
        let Some(interval) = normalize_event(raw, &config.timezone, &config.normalize) else {
            continue;
        };

        if !window.admits(&interval, config.window_policy) {
            outside_window += 1;
            continue;
        }

        let summary = raw.summary_text();
        for name in patterns.matches(summary, raw.description.as_deref()) {
            result.push(
                name,
                MatchedEvent::new(interval.start, summary, interval.duration())
                    .with_source_index(index),
            );
        }
    }

    if config.sort_by_start {
        result.sort_by_start();
    }

    debug!(
        events = events.len(),
        outside_window,
        matches = result.total_matches(),
        "Analyzed events"
    );

    result
}

/// Analyzer over a lazily loaded calendar source.
///
/// The source is loaded on the first call that needs events and never
/// reloaded afterwards.
pub struct CalendarAnalyzer<S> {
    source: S,
    config: AnalyzerConfig,
    events: OnceCell<Vec<RawEvent>>,
}

impl<S: CalendarSource> CalendarAnalyzer<S> {
    /// Creates an analyzer with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, AnalyzerConfig::default())
    }

    /// Creates an analyzer with the given configuration.
    pub fn with_config(source: S, config: AnalyzerConfig) -> Self {
        Self {
            source,
            config,
            events: OnceCell::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns true once the source has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.events.get().is_some()
    }

    /// Returns the loaded events, loading the source on first call.
    ///
    /// # Errors
    ///
    /// Propagates the source's load error. A failed load is not cached, so
    /// a later call tries again.
    pub fn events(&self) -> Result<&[RawEvent], SourceError> {
        if let Some(events) = self.events.get() {
            return Ok(events.as_slice());
        }
        let loaded = self.source.load()?;
        info!(
            source = %self.source.describe(),
            events = loaded.len(),
            "Loaded calendar"
        );
        Ok(self.events.get_or_init(|| loaded).as_slice())
    }

    /// Runs the analysis over the (cached) calendar.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnalyzerError::Source`] when the calendar cannot be
    /// loaded.
    pub fn analyze(
        &self,
        window: &TimeWindow,
        patterns: &PatternSet,
    ) -> AnalyzerResult<AnalysisResult> {
        let events = self.events()?;
        Ok(analyze_events(events, window, patterns, &self.config))
    }
}
