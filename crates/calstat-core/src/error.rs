//! Error types for loading calendars and running an analysis.

use std::io;
use thiserror::Error;

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Errors raised while loading a calendar source.
///
/// The variants are kept distinct so a front end can tell "file not found"
/// apart from "file found but not a calendar".
#[derive(Debug, Error)]
pub enum SourceError {
    /// The calendar file or feed does not exist.
    #[error("calendar source not found: {path}")]
    NotFound { path: String },

    /// The calendar exists but could not be read.
    #[error("failed to read calendar source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The payload is not a parseable calendar.
    #[error("malformed calendar: {message}")]
    Malformed { message: String },
}

impl SourceError {
    /// Creates a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an IO error for the given path.
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed calendar error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Returns true if the source does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors that can occur before or during an analysis run.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The calendar source failed to load.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A caller-supplied regular expression does not compile.
    #[error("invalid pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// The same pattern name was supplied twice.
    #[error("duplicate pattern name '{name}'")]
    DuplicatePattern { name: String },

    /// The analysis timezone is not a known IANA identifier.
    #[error("unknown timezone '{name}'")]
    InvalidTimezone { name: String },
}

impl AnalyzerError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(name: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            name: name.into(),
            source,
        }
    }

    /// Creates a duplicate pattern error.
    pub fn duplicate_pattern(name: impl Into<String>) -> Self {
        Self::DuplicatePattern { name: name.into() }
    }

    /// Creates an invalid timezone error.
    pub fn invalid_timezone(name: impl Into<String>) -> Self {
        Self::InvalidTimezone { name: name.into() }
    }
}
