//! The analysis command: load, analyze, aggregate, render.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use calstat_core::analysis::CalendarAnalyzer;
use calstat_core::pattern::PatternSet;
use calstat_core::stats::Report;
use calstat_providers::IcsFileSource;

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::dates::resolve_window;
use crate::error::ClientResult;
use crate::render::{render_json, render_text};

/// Runs one analysis and returns the rendered report.
///
/// `now` anchors relative dates and the default window end.
pub fn run(cli: &Cli, config: &ClientConfig, now: DateTime<Utc>) -> ClientResult<String> {
    let timezone = config.timezone(cli.timezone.as_deref())?;
    let window = resolve_window(cli.start.as_deref(), cli.end.as_deref(), &timezone, now)?;

    let patterns = match cli.pattern {
        Some(ref expr) => PatternSet::single(expr)?,
        None => config.pattern_set()?,
    };
    let patterns = patterns
        .with_description_search(config.analysis.search_description && !cli.no_description);

    let mut analyzer_config = config.analyzer_config(timezone);
    if let Some(policy) = cli.window_policy {
        analyzer_config = analyzer_config.with_window_policy(policy.into());
    }
    debug!(
        timezone = timezone.name(),
        start = %window.start,
        end = %window.end,
        policy = ?analyzer_config.window_policy,
        patterns = patterns.len(),
        "Resolved analysis settings"
    );

    let source = IcsFileSource::new(config.resolve_calendar(&cli.calendar_file));
    let analyzer = CalendarAnalyzer::with_config(source, analyzer_config);
    let result = analyzer.analyze(&window, &patterns)?;
    info!(matches = result.total_matches(), "Analysis complete");

    let report = Report::build(&result);
    if cli.json {
        render_json(&report, &window)
    } else {
        render_text(&report, &window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternSetting;
    use chrono::TimeZone;
    use clap::Parser;
    use tempfile::TempDir;

    const ICS: &str = "BEGIN:VCALENDAR\r\n\
                       VERSION:2.0\r\n\
                       BEGIN:VEVENT\r\n\
                       UID:a@example.com\r\n\
                       DTSTART:20240304T180000Z\r\n\
                       DTEND:20240304T190000Z\r\n\
                       SUMMARY:Design meeting\r\n\
                       END:VEVENT\r\n\
                       BEGIN:VEVENT\r\n\
                       UID:b@example.com\r\n\
                       DTSTART:20240304T183000Z\r\n\
                       DTEND:20240304T193000Z\r\n\
                       SUMMARY:Lunch\r\n\
                       DESCRIPTION:coffee after\r\n\
                       END:VEVENT\r\n\
                       END:VCALENDAR\r\n";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
    }

    fn calendar() -> (TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("work.ics");
        std::fs::write(&path, ICS).unwrap();
        let path = path.display().to_string();
        (dir, path)
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("calstat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn default_patterns_text_report() {
        let (_dir, path) = calendar();
        let output = run(
            &cli(&[&path, "--start", "2024-03-01"]),
            &ClientConfig::default(),
            now(),
        )
        .unwrap();

        assert!(output.contains("Meetings (1 events):"));
        assert!(output.contains("2024-03-04 10:00 - Design meeting (1.0h)"));
        assert!(output.contains("Social (1 events):"));
        assert!(output.contains("Design meeting and Lunch overlap until 2024-03-04 11:00"));
    }

    #[test]
    fn ad_hoc_pattern_json() {
        let (_dir, path) = calendar();
        let output = run(
            &cli(&[&path, "--pattern", "LUNCH", "--json", "--timezone", "UTC"]),
            &ClientConfig::default(),
            now(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["timezone"], "UTC");
        let events = value["events"]["matched_events"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        let start = DateTime::parse_from_rfc3339(events[0]["start"].as_str().unwrap()).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 4, 18, 30, 0).unwrap());
    }

    #[test]
    fn no_description_flag_limits_matching() {
        let (_dir, path) = calendar();
        let config = ClientConfig {
            patterns: vec![PatternSetting {
                name: "caffeine".to_string(),
                regex: "coffee".to_string(),
            }],
            ..Default::default()
        };

        let with = run(&cli(&[&path, "--json"]), &config, now()).unwrap();
        let without = run(&cli(&[&path, "--json", "--no-description"]), &config, now()).unwrap();
        let with: serde_json::Value = serde_json::from_str(&with).unwrap();
        let without: serde_json::Value = serde_json::from_str(&without).unwrap();

        assert_eq!(with["events"]["caffeine"].as_array().unwrap().len(), 1);
        assert!(without["events"]["caffeine"].as_array().unwrap().is_empty());
    }

    #[test]
    fn window_excludes_events() {
        let (_dir, path) = calendar();
        let output = run(
            &cli(&[&path, "--start", "2024-03-05", "--json"]),
            &ClientConfig::default(),
            now(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["events"]["meetings"], serde_json::json!([]));
        assert_eq!(value["overlaps"], serde_json::json!([]));
    }

    #[test]
    fn missing_calendar_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.ics").display().to_string();
        let err = run(&cli(&[&path]), &ClientConfig::default(), now()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_inputs_fail_before_loading() {
        let (_dir, path) = calendar();
        let config = ClientConfig::default();

        assert!(run(&cli(&[&path, "--pattern", "("]), &config, now()).is_err());
        assert!(run(&cli(&[&path, "--start", "someday"]), &config, now()).is_err());
        assert!(run(&cli(&[&path, "--timezone", "Nowhere/City"]), &config, now()).is_err());
    }
}
