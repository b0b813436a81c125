//! iCalendar (RFC 5545) parsing into [`RawEvent`]s.
//!
//! Recurring events are returned once, as written; `RRULE` is not expanded.
//! An event without `DTEND` takes its end from `DURATION` when present.

use chrono::{Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event, EventLike,
};
use tracing::{debug, warn};

use calstat_core::error::SourceError;
use calstat_core::raw_event::{RawEvent, RawEventTime};
use calstat_core::time::localize;

/// Parses ICS content and returns one raw event per `VEVENT`.
///
/// Events whose `DTSTART` cannot be interpreted are kept with no start so
/// the analyzer skips them.
///
/// # Errors
///
/// Returns [`SourceError::Malformed`] when the content is not an iCalendar
/// document.
pub fn parse_ics_content(ics: &str) -> Result<Vec<RawEvent>, SourceError> {
    let trimmed = ics.trim_start_matches('\u{feff}').trim_start();
    if !trimmed
        .get(..15)
        .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCALENDAR"))
    {
        return Err(SourceError::malformed("missing BEGIN:VCALENDAR"));
    }

    let calendar = trimmed
        .parse::<Calendar>()
        .map_err(|e| SourceError::malformed(e.to_string()))?;

    let events: Vec<RawEvent> = calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(parse_event(event)),
            _ => None,
        })
        .collect();

    debug!(count = events.len(), "Parsed events from ICS");
    Ok(events)
}

/// Converts a single VEVENT.
fn parse_event(event: &Event) -> RawEvent {
    let uid = event.get_uid().map(str::to_string);

    let start = event.get_start().map(convert_date_time);
    if start.is_none() && event.property_value("DTSTART").is_some() {
        warn!(uid = ?uid, "Unparseable DTSTART, event will be skipped");
    }
    let end = event
        .get_end()
        .map(convert_date_time)
        .or_else(|| end_from_duration(event, start.as_ref()?, uid.as_deref()));

    if event.property_value("RRULE").is_some() {
        debug!(uid = ?uid, "Recurring event counted once");
    }

    let raw = RawEvent {
        uid,
        start,
        end,
        summary: event.get_summary().map(str::to_string),
        description: event.get_description().map(str::to_string),
        location: event.get_location().map(str::to_string),
    };

    debug!(
        uid = ?raw.uid,
        summary = ?raw.summary,
        start = ?raw.start,
        "Parsed event from ICS"
    );
    raw
}

/// Derives the end from `DURATION` when `DTEND` is absent.
fn end_from_duration(
    event: &Event,
    start: &RawEventTime,
    uid: Option<&str>,
) -> Option<RawEventTime> {
    let value = event.property_value("DURATION")?;
    let Some(duration) = parse_duration(value) else {
        debug!(uid = ?uid, value, "Unparseable DURATION, using default length");
        return None;
    };
    match start {
        RawEventTime::Date(date) => date
            .checked_add_signed(duration)
            .map(RawEventTime::from_date),
        RawEventTime::DateTime(dt) => dt
            .checked_add_signed(duration)
            .map(RawEventTime::from_datetime),
        RawEventTime::Floating(naive) => naive
            .checked_add_signed(duration)
            .map(RawEventTime::from_floating),
    }
}

/// Parses an RFC 5545 duration such as `PT1H30M`, `P1D` or `-P2W`.
fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (negative, rest) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    let rest = rest.strip_prefix(['P', 'p'])?;

    let mut total = Duration::zero();
    let mut in_time = false;
    let mut digits = String::new();
    let mut parts = 0;
    for ch in rest.chars() {
        match ch.to_ascii_uppercase() {
            '0'..='9' => digits.push(ch),
            'T' if !in_time && digits.is_empty() => in_time = true,
            unit => {
                let n: i64 = digits.parse().ok()?;
                digits.clear();
                total += match (unit, in_time) {
                    ('W', false) => Duration::try_weeks(n)?,
                    ('D', false) => Duration::try_days(n)?,
                    ('H', true) => Duration::try_hours(n)?,
                    ('M', true) => Duration::try_minutes(n)?,
                    ('S', true) => Duration::try_seconds(n)?,
                    _ => return None,
                };
                parts += 1;
            }
        }
    }
    if parts == 0 || !digits.is_empty() {
        return None;
    }
    Some(if negative { -total } else { total })
}

/// Converts an icalendar date or datetime to a [`RawEventTime`].
///
/// `TZID` values are resolved with chrono-tz. Unknown zones fall back to
/// floating time.
fn convert_date_time(dt: DatePerhapsTime) -> RawEventTime {
    match dt {
        DatePerhapsTime::Date(date) => RawEventTime::from_date(date),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(utc)) => RawEventTime::from_datetime(utc),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => {
            RawEventTime::from_floating(naive)
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            resolve_tzid(date_time, &tzid)
        }
    }
}

fn resolve_tzid(date_time: NaiveDateTime, tzid: &str) -> RawEventTime {
    match tzid.trim_matches('"').parse::<Tz>() {
        Ok(tz) => RawEventTime::from_datetime(localize(date_time, &tz).with_timezone(&Utc)),
        Err(_) => {
            warn!(tzid, "Unknown TZID, treating time as floating");
            RawEventTime::from_floating(date_time)
        }
    }
}
