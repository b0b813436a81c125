//! RawEvent to NormalizedInterval conversion.
//!
//! Every raw event is reduced to a `(start, end, is_all_day)` interval in
//! the analysis timezone:
//! 1. Events with no start marker are skipped
//! 2. A missing end defaults to `start + default_duration`
//! 3. Zone-less datetimes are read as UTC, bare dates as local midnight
//! 4. An end before the start is clamped to the start
//!
//! All-day events keep their calendar span in the interval (it matters for
//! window filtering) but always report a zero [`NormalizedInterval::duration`].

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::raw_event::{RawEvent, RawEventTime};
use crate::time::{end_of_day, start_of_day};

/// How a date-only end marker is anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllDayEnd {
    /// Local midnight at the start of the end date.
    #[default]
    StartOfDay,
    /// The last instant of the end date.
    EndOfDay,
}

/// Defaulting rules applied while normalizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizePolicy {
    /// Length given to timed events that have no end marker.
    pub default_duration: Duration,
    /// Anchoring of date-only end markers.
    pub all_day_end: AllDayEnd,
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        Self {
            default_duration: Duration::hours(1),
            all_day_end: AllDayEnd::StartOfDay,
        }
    }
}

impl NormalizePolicy {
    /// Builder: set the default duration for events without an end.
    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Builder: set the all-day end anchoring.
    #[must_use]
    pub fn with_all_day_end(mut self, all_day_end: AllDayEnd) -> Self {
        self.all_day_end = all_day_end;
        self
    }
}

/// An event interval in the analysis timezone.
///
/// `end >= start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedInterval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub is_all_day: bool,
}

impl NormalizedInterval {
    /// Time actually spent in the event; zero for all-day markers.
    pub fn duration(&self) -> Duration {
        if self.is_all_day {
            Duration::zero()
        } else {
            self.end - self.start
        }
    }
}

/// Converts a [`RawEvent`] to a [`NormalizedInterval`] in `tz`.
///
/// Returns `None` when the event has no start marker.
pub fn normalize_event(
    raw: &RawEvent,
    tz: &Tz,
    policy: &NormalizePolicy,
) -> Option<NormalizedInterval> {
    let Some(raw_start) = raw.start else {
        debug!(uid = ?raw.uid, summary = ?raw.summary, "Skipping event without start");
        return None;
    };

    let is_all_day = raw_start.is_all_day();
    let start = convert_start(&raw_start, tz);

    let end = match raw.end {
        Some(raw_end) => convert_end(&raw_end, tz, policy.all_day_end),
        // A bare date plus a sub-day span stays on that date.
        None if is_all_day => start,
        None => start + policy.default_duration,
    };

    let end = if end < start {
        debug!(uid = ?raw.uid, %start, %end, "Clamping event end to its start");
        start
    } else {
        end
    };

    Some(NormalizedInterval {
        start,
        end,
        is_all_day,
    })
}

fn convert_start(raw: &RawEventTime, tz: &Tz) -> DateTime<Tz> {
    match raw {
        RawEventTime::Date(date) => start_of_day(*date, tz),
        RawEventTime::DateTime(dt) => dt.with_timezone(tz),
        RawEventTime::Floating(naive) => Utc.from_utc_datetime(naive).with_timezone(tz),
    }
}

fn convert_end(raw: &RawEventTime, tz: &Tz, all_day_end: AllDayEnd) -> DateTime<Tz> {
    match (raw, all_day_end) {
        (RawEventTime::Date(date), AllDayEnd::EndOfDay) => end_of_day(*date, tz),
        _ => convert_start(raw, tz),
    }
}
