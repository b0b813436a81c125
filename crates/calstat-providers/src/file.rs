//! ICS files on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use calstat_core::error::SourceError;
use calstat_core::raw_event::RawEvent;
use calstat_core::source::CalendarSource;

use crate::ics::parse_ics_content;

/// A calendar read from a local `.ics` file each time it is loaded.
#[derive(Debug, Clone)]
pub struct IcsFileSource {
    path: PathBuf,
}

impl IcsFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalendarSource for IcsFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<RawEvent>, SourceError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::not_found(self.describe()),
            _ => SourceError::io(self.describe(), e),
        })?;

        let events = parse_ics_content(&content)?;
        info!(path = %self.path.display(), count = events.len(), "Loaded calendar file");
        Ok(events)
    }
}
