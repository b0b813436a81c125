//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calstat/config.toml` by default:
//!
//! ```toml
//! timezone = "Europe/Paris"
//! calendar_dir = "/home/me/calendars"
//!
//! [analysis]
//! window_policy = "start_within"
//! default_event_minutes = 30
//! all_day_end = "end_of_day"
//! sort = true
//! search_description = true
//!
//! [[patterns]]
//! name = "deep_work"
//! regex = "focus|deep work"
//! ```
//!
//! Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use calstat_core::analysis::AnalyzerConfig;
use calstat_core::error::{AnalyzerError, AnalyzerResult};
use calstat_core::interval::{AllDayEnd, NormalizePolicy};
use calstat_core::pattern::PatternSet;
use calstat_core::time::{DEFAULT_TIMEZONE, WindowPolicy, parse_timezone};

use crate::error::{ClientError, ClientResult};

/// Configuration for the calstat client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// IANA timezone for bucketing.
    pub timezone: Option<String>,

    /// Directory searched for relative calendar file names.
    pub calendar_dir: Option<PathBuf>,

    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Ordered patterns; the built-in set is used when empty.
    #[serde(default)]
    pub patterns: Vec<PatternSetting>,
}

/// Analysis policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub window_policy: WindowPolicy,

    /// Length of timed events with no end, in minutes.
    pub default_event_minutes: i64,

    pub all_day_end: AllDayEnd,

    /// Sort each pattern's events by start.
    pub sort: bool,

    /// Search descriptions as well as summaries.
    pub search_description: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            window_policy: WindowPolicy::Overlap,
            default_event_minutes: 60,
            all_day_end: AllDayEnd::StartOfDay,
            sort: true,
            search_description: true,
        }
    }
}

/// One `[[patterns]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSetting {
    pub name: String,
    pub regex: String,
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it does not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calstat")
    }

    /// Resolves the analysis timezone; `override_name` wins over the file.
    pub fn timezone(&self, override_name: Option<&str>) -> AnalyzerResult<Tz> {
        match override_name.or(self.timezone.as_deref()) {
            Some(name) => parse_timezone(name).ok_or_else(|| AnalyzerError::invalid_timezone(name)),
            None => Ok(DEFAULT_TIMEZONE),
        }
    }

    /// Builds the configured pattern set.
    pub fn pattern_set(&self) -> AnalyzerResult<PatternSet> {
        let set = if self.patterns.is_empty() {
            PatternSet::default_set()
        } else {
            PatternSet::new(self.patterns.iter().map(|p| (p.name.as_str(), p.regex.as_str())))?
        };
        Ok(set.with_description_search(self.analysis.search_description))
    }

    /// Builds the analyzer configuration for `timezone`.
    pub fn analyzer_config(&self, timezone: Tz) -> AnalyzerConfig {
        let normalize = NormalizePolicy::default()
            .with_default_duration(Duration::minutes(self.analysis.default_event_minutes.max(0)))
            .with_all_day_end(self.analysis.all_day_end);
        AnalyzerConfig::default()
            .with_timezone(timezone)
            .with_window_policy(self.analysis.window_policy)
            .with_normalize_policy(normalize)
            .with_sort_by_start(self.analysis.sort)
    }

    /// Locates a calendar file.
    ///
    /// A relative path that does not exist is looked up in `calendar_dir`.
    pub fn resolve_calendar(&self, file: &Path) -> PathBuf {
        if file.is_absolute() || file.exists() {
            return file.to_path_buf();
        }
        match self.calendar_dir {
            Some(ref dir) if dir.join(file).exists() => dir.join(file),
            _ => file.to_path_buf(),
        }
    }
}
