//! Time types for the analysis window.
//!
//! This module provides [`TimeWindow`], the closed `[start, end]` range an
//! analysis is restricted to, the [`WindowPolicy`] deciding which events
//! count as "inside" it, and helpers for anchoring bare dates in the
//! analysis timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::interval::NormalizedInterval;

/// The default analysis timezone.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;

/// Parses an IANA timezone identifier such as `Europe/Paris`.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// Anchors a wall-clock datetime in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times
/// that do not exist (DST spring-forward) are read as UTC instead.
pub fn localize(naive: NaiveDateTime, tz: &Tz) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Returns local midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    localize(date.and_time(NaiveTime::MIN), tz)
}

/// Returns the last representable instant of `date` (23:59:59.999999).
pub fn end_of_day(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let last = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
    localize(date.and_time(last), tz)
}

/// Which intervals a window admits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Keep any interval that intersects the closed window.
    #[default]
    Overlap,
    /// Keep only intervals whose start falls inside the window.
    StartWithin,
}

/// A closed `[start, end]` analysis window in the analysis timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Tz>,
    /// End of the window (inclusive).
    pub end: DateTime<Tz>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Creates a window, returning `None` if `start` is after `end`.
    pub fn checked(start: DateTime<Tz>, end: DateTime<Tz>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// The whole history: local midnight 1970-01-01 through `now`.
    pub fn through(now: DateTime<Utc>, tz: &Tz) -> Self {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
        let start = start_of_day(epoch, tz);
        let end = now.with_timezone(tz);
        Self::checked(start, end).unwrap_or(Self { start, end: start })
    }

    /// Checks if a datetime falls within this closed window.
    pub fn contains(&self, dt: &DateTime<Tz>) -> bool {
        self.start <= *dt && *dt <= self.end
    }

    /// Checks if an interval has any overlap with this closed window.
    pub fn overlaps(&self, interval: &NormalizedInterval) -> bool {
        !(interval.end < self.start || interval.start > self.end)
    }

    /// Applies `policy` to decide whether the interval is kept.
    pub fn admits(&self, interval: &NormalizedInterval, policy: WindowPolicy) -> bool {
        match policy {
            WindowPolicy::Overlap => self.overlaps(interval),
            WindowPolicy::StartWithin => self.contains(&interval.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};

    fn la(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        DEFAULT_TIMEZONE
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(start: DateTime<Tz>, end: DateTime<Tz>) -> NormalizedInterval {
        NormalizedInterval {
            start,
            end,
            is_all_day: false,
        }
    }

    mod anchoring {
        use super::*;

        #[test]
        fn parses_known_zones() {
            assert_eq!(parse_timezone("America/Los_Angeles"), Some(DEFAULT_TIMEZONE));
            assert_eq!(parse_timezone(" UTC "), Some(chrono_tz::UTC));
            assert_eq!(parse_timezone("Mars/Olympus_Mons"), None);
        }

        #[test]
        fn start_of_day_is_local_midnight() {
            let dt = start_of_day(date(2024, 12, 11), &DEFAULT_TIMEZONE);
            assert_eq!(dt, la(2024, 12, 11, 0, 0));
        }

        #[test]
        fn end_of_day_is_last_microsecond() {
            let dt = end_of_day(date(2024, 12, 11), &DEFAULT_TIMEZONE);
            assert_eq!(dt.hour(), 23);
            assert_eq!(dt.minute(), 59);
            assert_eq!(dt.nanosecond(), 999_999_000);
            assert_eq!(dt.date_naive(), date(2024, 12, 11));
        }

        #[test]
        fn nonexistent_local_time_falls_back_to_utc() {
            // 02:30 does not exist in Los Angeles on 2024-03-10.
            let naive = date(2024, 3, 10).and_hms_opt(2, 30, 0).unwrap();
            let dt = localize(naive, &DEFAULT_TIMEZONE);
            assert_eq!(dt.naive_utc(), naive);
        }

        #[test]
        fn ambiguous_local_time_takes_earliest() {
            // 01:30 occurs twice in Los Angeles on 2024-11-03.
            let naive = date(2024, 11, 3).and_hms_opt(1, 30, 0).unwrap();
            let dt = localize(naive, &DEFAULT_TIMEZONE);
            assert_eq!(dt.naive_utc(), date(2024, 11, 3).and_hms_opt(8, 30, 0).unwrap());
        }
    }

    mod window {
        use super::*;

        #[test]
        #[should_panic(expected = "start must be <= end")]
        fn invalid_window() {
            TimeWindow::new(la(2024, 12, 31, 0, 0), la(2024, 12, 1, 0, 0));
        }

        #[test]
        fn checked_rejects_inverted_bounds() {
            assert!(TimeWindow::checked(la(2024, 12, 31, 0, 0), la(2024, 12, 1, 0, 0)).is_none());
            assert!(TimeWindow::checked(la(2024, 12, 1, 0, 0), la(2024, 12, 1, 0, 0)).is_some());
        }

        #[test]
        fn through_starts_at_epoch() {
            let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
            let window = TimeWindow::through(now, &DEFAULT_TIMEZONE);
            assert_eq!(window.start, la(1970, 1, 1, 0, 0));
            assert_eq!(window.end, now.with_timezone(&DEFAULT_TIMEZONE));
        }

        #[test]
        fn contains_is_closed_on_both_ends() {
            let window = TimeWindow::new(la(2024, 12, 1, 9, 0), la(2024, 12, 1, 17, 0));
            assert!(window.contains(&la(2024, 12, 1, 9, 0)));
            assert!(window.contains(&la(2024, 12, 1, 17, 0)));
            assert!(!window.contains(&(la(2024, 12, 1, 17, 0) + Duration::seconds(1))));
            assert!(!window.contains(&(la(2024, 12, 1, 9, 0) - Duration::seconds(1))));
        }

        #[test]
        fn overlap_policy() {
            let window = TimeWindow::new(la(2024, 12, 1, 9, 0), la(2024, 12, 1, 17, 0));

            // Starts before, ends inside
            let iv = interval(la(2024, 12, 1, 8, 0), la(2024, 12, 1, 10, 0));
            assert!(window.admits(&iv, WindowPolicy::Overlap));
            assert!(!window.admits(&iv, WindowPolicy::StartWithin));

            // Ends exactly at window start: the window is closed, so it touches
            let iv = interval(la(2024, 12, 1, 8, 0), la(2024, 12, 1, 9, 0));
            assert!(window.admits(&iv, WindowPolicy::Overlap));

            // Starts exactly at window end
            let iv = interval(la(2024, 12, 1, 17, 0), la(2024, 12, 1, 18, 0));
            assert!(window.admits(&iv, WindowPolicy::Overlap));
            assert!(window.admits(&iv, WindowPolicy::StartWithin));

            // Entirely after
            let iv = interval(la(2024, 12, 1, 17, 1), la(2024, 12, 1, 18, 0));
            assert!(!window.admits(&iv, WindowPolicy::Overlap));

            // Entirely before
            let iv = interval(la(2024, 12, 1, 7, 0), la(2024, 12, 1, 8, 59));
            assert!(!window.admits(&iv, WindowPolicy::Overlap));
        }

        #[test]
        fn window_policy_serde_names() {
            let json = serde_json::to_string(&WindowPolicy::StartWithin).unwrap();
            assert_eq!(json, "\"start_within\"");
            let parsed: WindowPolicy = serde_json::from_str("\"overlap\"").unwrap();
            assert_eq!(parsed, WindowPolicy::Overlap);
        }
    }
}
