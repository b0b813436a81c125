//! Core of calstat: raw events, interval normalization, pattern matching,
//! analysis and aggregate statistics.

pub mod analysis;
pub mod error;
pub mod interval;
pub mod pattern;
pub mod raw_event;
pub mod source;
pub mod stats;
pub mod time;
pub mod tracing;

pub use analysis::{
    AnalysisResult, AnalyzerConfig, CalendarAnalyzer, MatchedEvent, analyze_events, duration_hours,
};
pub use error::{AnalyzerError, AnalyzerResult, SourceError};
pub use interval::{AllDayEnd, NormalizePolicy, NormalizedInterval, normalize_event};
pub use pattern::{AD_HOC_PATTERN_NAME, DEFAULT_PATTERNS, PatternSet};
pub use raw_event::{RawEvent, RawEventTime};
pub use source::CalendarSource;
pub use stats::Report;
pub use time::{DEFAULT_TIMEZONE, TimeWindow, WindowPolicy, parse_timezone};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
