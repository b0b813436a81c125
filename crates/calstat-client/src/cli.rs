//! Command-line interface definition.

use std::path::PathBuf;

use calstat_core::time::WindowPolicy;
use clap::{Parser, ValueEnum};

/// calstat - Where does your time go? Statistics over an .ics calendar
#[derive(Debug, Parser)]
#[command(name = "calstat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Calendar file (.ics) to analyze
    pub calendar_file: PathBuf,

    // --- Window ---
    /// Start date (e.g. "2024-01-01", "30 days ago", "today")
    #[arg(long)]
    pub start: Option<String>,

    /// End date (e.g. "2024-12-31", "today", "now"); a bare date means the end of that day
    #[arg(long)]
    pub end: Option<String>,

    /// Which events count as inside the window
    #[arg(long, value_enum)]
    pub window_policy: Option<WindowPolicyArg>,

    // --- Matching ---
    /// Regex pattern to filter events (searches both summary and description)
    #[arg(long, short)]
    pub pattern: Option<String>,

    /// Only search event summaries
    #[arg(long)]
    pub no_description: bool,

    /// IANA timezone used for bucketing (default America/Los_Angeles)
    #[arg(long, short = 'z', env = "CALSTAT_TIMEZONE")]
    pub timezone: Option<String>,

    // --- Output ---
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long, short, env = "CALSTAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,
}

/// Command-line spelling of [`WindowPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowPolicyArg {
    /// Any event that overlaps the window
    Overlap,
    /// Only events that start inside the window
    StartWithin,
}

impl From<WindowPolicyArg> for WindowPolicy {
    fn from(arg: WindowPolicyArg) -> Self {
        match arg {
            WindowPolicyArg::Overlap => Self::Overlap,
            WindowPolicyArg::StartWithin => Self::StartWithin,
        }
    }
}
