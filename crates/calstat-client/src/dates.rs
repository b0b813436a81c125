//! Parsing of `--start` / `--end` values into an analysis window.
//!
//! Accepted forms, case-insensitive:
//! - `YYYY-MM-DD`
//! - `YYYY-MM-DD HH:MM[:SS]` (or with a `T` separator), local wall time
//! - RFC 3339 (`2024-03-01T09:00:00Z`)
//! - `now`, `today`, `yesterday`
//! - `N day(s) ago`, `N week(s) ago`
//!
//! Anything that names a whole day opens at local midnight when used as a
//! start and closes at the last instant of that day when used as an end.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use calstat_core::time::{TimeWindow, end_of_day, localize, start_of_day};

use crate::error::{ClientError, ClientResult};

/// Which side of the window a value bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// A parsed value before it is anchored to a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Moment {
    Day(NaiveDate),
    Instant(DateTime<Tz>),
}

/// Parses one date expression relative to `now`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidDate`] when no form matches.
pub fn parse_date(
    input: &str,
    bound: Bound,
    tz: &Tz,
    now: DateTime<Utc>,
) -> ClientResult<DateTime<Tz>> {
    let expr = input.trim().to_lowercase();
    let local_now = now.with_timezone(tz);

    let moment = try_anchored(&expr, &local_now)
        .or_else(|| try_days_ago(&expr, &local_now))
        .or_else(|| try_iso_date(&expr))
        .or_else(|| try_local_datetime(&expr, tz))
        .or_else(|| try_rfc3339(input.trim(), tz))
        .ok_or_else(|| ClientError::invalid_date(input))?;

    Ok(match (moment, bound) {
        (Moment::Instant(dt), _) => dt,
        (Moment::Day(date), Bound::Start) => start_of_day(date, tz),
        (Moment::Day(date), Bound::End) => end_of_day(date, tz),
    })
}

/// Builds the analysis window.
///
/// A missing start means 1970-01-01 local midnight; a missing end means `now`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidDate`] for an unparseable value and
/// [`ClientError::InvalidWindow`] when the start is after the end.
pub fn resolve_window(
    start: Option<&str>,
    end: Option<&str>,
    tz: &Tz,
    now: DateTime<Utc>,
) -> ClientResult<TimeWindow> {
    let whole = TimeWindow::through(now, tz);
    let start = match start {
        Some(s) => parse_date(s, Bound::Start, tz, now)?,
        None => whole.start,
    };
    let end = match end {
        Some(s) => parse_date(s, Bound::End, tz, now)?,
        None => whole.end,
    };

    TimeWindow::checked(start, end).ok_or_else(|| ClientError::InvalidWindow {
        start: start.to_rfc3339(),
        end: end.to_rfc3339(),
    })
}

fn try_anchored(s: &str, local_now: &DateTime<Tz>) -> Option<Moment> {
    match s {
        "now" => Some(Moment::Instant(*local_now)),
        "today" => Some(Moment::Day(local_now.date_naive())),
        "yesterday" => local_now.date_naive().pred_opt().map(Moment::Day),
        _ => None,
    }
}

/// "N day(s) ago", "N week(s) ago".
fn try_days_ago(s: &str, local_now: &DateTime<Tz>) -> Option<Moment> {
    let rest = s.strip_suffix(" ago")?;
    let (n, unit) = rest.split_once(' ')?;
    let n: i64 = n.trim().parse().ok()?;
    let days = match unit.trim() {
        "day" | "days" => n,
        "week" | "weeks" => n.checked_mul(7)?,
        _ => return None,
    };
    local_now
        .date_naive()
        .checked_sub_signed(Duration::try_days(days)?)
        .map(Moment::Day)
}

fn try_iso_date(s: &str) -> Option<Moment> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Moment::Day)
}

fn try_local_datetime(s: &str, tz: &Tz) -> Option<Moment> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dt%H:%M:%S",
        "%Y-%m-%dt%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| Moment::Instant(localize(naive, tz)))
}

fn try_rfc3339(s: &str, tz: &Tz) -> Option<Moment> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| Moment::Instant(dt.with_timezone(tz)))
}
