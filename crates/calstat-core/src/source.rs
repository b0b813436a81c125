//! CalendarSource trait definition.
//!
//! A [`CalendarSource`] is anything that can produce the raw events of one
//! calendar: an ICS file on disk, an in-memory list, a fetched feed. Sources
//! only load and parse; all normalization and matching happens in the
//! analyzer.

use crate::error::SourceError;
use crate::raw_event::RawEvent;

/// A read-only supplier of raw calendar events.
pub trait CalendarSource {
    /// Returns a short human-readable description (e.g. a file path).
    fn describe(&self) -> String;

    /// Loads every event of the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] when the calendar does not exist,
    /// [`SourceError::Io`] when it cannot be read and
    /// [`SourceError::Malformed`] when its contents are not a calendar.
    fn load(&self) -> Result<Vec<RawEvent>, SourceError>;
}

impl CalendarSource for Vec<RawEvent> {
    fn describe(&self) -> String {
        format!("in-memory calendar ({} events)", self.len())
    }

    fn load(&self) -> Result<Vec<RawEvent>, SourceError> {
        Ok(self.clone())
    }
}

impl<S: CalendarSource + ?Sized> CalendarSource for &S {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn load(&self) -> Result<Vec<RawEvent>, SourceError> {
        (**self).load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_event::RawEventTime;
    use chrono::NaiveDate;

    #[test]
    fn vec_source_returns_its_events() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
        let events = vec![RawEvent::new(RawEventTime::from_date(date)).with_summary("Holiday")];

        let loaded = events.load().unwrap();
        assert_eq!(loaded, events);
        assert_eq!(events.describe(), "in-memory calendar (1 events)");
    }

    #[test]
    fn reference_forwards_to_source() {
        let events: Vec<RawEvent> = Vec::new();
        let source = &events;
        assert!(source.load().unwrap().is_empty());
    }
}
