//! Client error types.

use calstat_core::error::{AnalyzerError, SourceError};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Loading or analyzing the calendar failed.
    #[error(transparent)]
    Analysis(#[from] AnalyzerError),

    /// A `--start`/`--end` value could not be understood.
    #[error("not a valid date: '{input}'")]
    InvalidDate { input: String },

    /// The window start is after its end.
    #[error("start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Render(#[from] std::fmt::Error),
}

impl ClientError {
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Returns true if the calendar file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Analysis(AnalyzerError::Source(SourceError::NotFound { .. })))
    }
}

impl From<SourceError> for ClientError {
    fn from(err: SourceError) -> Self {
        Self::Analysis(err.into())
    }
}
