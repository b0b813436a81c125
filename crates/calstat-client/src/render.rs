//! Text and JSON rendering of a [`Report`].

use std::fmt::Write;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use calstat_core::stats::Report;
use calstat_core::time::TimeWindow;

use crate::error::ClientResult;

const DATE: &str = "%Y-%m-%d";
const DATE_TIME: &str = "%Y-%m-%d %H:%M";

/// Capitalizes the first letter of every word, where any non-letter starts a word.
///
/// `matched_events` becomes `Matched_Events`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Renders the human-readable report.
pub fn render_text(report: &Report, window: &TimeWindow) -> ClientResult<String> {
    let mut out = String::new();
    write_text(&mut out, report, window)?;
    Ok(out)
}

fn write_text(out: &mut String, report: &Report, window: &TimeWindow) -> std::fmt::Result {
    writeln!(
        out,
        "Analyzing events from {} to {} ({})",
        window.start.format(DATE),
        window.end.format(DATE),
        window.start.timezone().name()
    )?;

    for (pattern, events) in report.events.iter() {
        writeln!(out)?;
        writeln!(out, "{} ({} events):", title_case(pattern), events.len())?;
        for event in events {
            writeln!(
                out,
                "{} - {} ({:.1}h)",
                event.start.format(DATE_TIME),
                event.summary,
                event.hours()
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Time Spent on Events:")?;
    for (pattern, spent) in report.time_spent.iter() {
        writeln!(out, "{}: {:.1} hours", title_case(pattern), spent.hours())?;
    }

    writeln!(out)?;
    writeln!(out, "Event Distribution by Day:")?;
    for (pattern, dist) in report.day_distribution.iter() {
        writeln!(out)?;
        writeln!(out, "{}:", title_case(pattern))?;
        for (day, bucket) in dist.iter() {
            writeln!(
                out,
                "  {:9} - {:2} events, {:5.1} hours total ({:4.1}h avg/event)",
                day, bucket.count, bucket.total_hours, bucket.avg_hours
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Monthly Statistics:")?;
    for (pattern, months) in report.monthly.iter() {
        writeln!(out)?;
        writeln!(out, "{}:", title_case(pattern))?;
        for (month, bucket) in months {
            writeln!(
                out,
                "  Month of {}: {:.1} total hours ({:.1}h avg/week), {} events",
                month, bucket.total_hours, bucket.avg_hours, bucket.event_count
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Weekly Statistics:")?;
    for (pattern, weeks) in report.weekly.iter() {
        writeln!(out)?;
        writeln!(out, "{}:", title_case(pattern))?;
        for (week, bucket) in weeks {
            writeln!(
                out,
                "  Week of {}: {:.1} total hours ({:.1}h avg/day)",
                week.format(DATE),
                bucket.total_hours,
                bucket.avg_hours
            )?;
        }
    }

    writeln!(out)?;
    if report.overlaps.is_empty() {
        writeln!(out, "Overlapping Events: none")?;
    } else {
        writeln!(out, "Overlapping Events ({}):", report.overlaps.len())?;
        for overlap in &report.overlaps {
            writeln!(
                out,
                "  {} and {} overlap until {}",
                overlap.first,
                overlap.second,
                overlap.overlap_end.format(DATE_TIME)
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    timezone: &'static str,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    #[serde(flatten)]
    report: &'a Report,
}

/// Renders the report as one pretty-printed JSON document.
pub fn render_json(report: &Report, window: &TimeWindow) -> ClientResult<String> {
    let doc = JsonReport {
        timezone: window.start.timezone().name(),
        start: window.start,
        end: window.end,
        report,
    };
    let mut json = serde_json::to_string_pretty(&doc)?;
    json.push('\n');
    Ok(json)
}
