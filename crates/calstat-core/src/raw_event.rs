//! Raw event records as exposed by a calendar source.
//!
//! A [`RawEvent`] carries whatever the calendar file contained, before any
//! timezone or duration policy is applied. Normalization into a uniform
//! interval happens in [`crate::interval`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// The start or end marker of a raw event.
///
/// Calendar files express times in three shapes:
/// - a bare date for all-day events
/// - a datetime whose zone is known (already resolved to an instant)
/// - a "floating" datetime with no zone attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RawEventTime {
    /// An all-day event date (no specific time).
    Date(NaiveDate),
    /// A timezone-aware instant.
    DateTime(DateTime<Utc>),
    /// A wall-clock datetime with no zone information.
    Floating(NaiveDateTime),
}

impl RawEventTime {
    /// Creates a RawEventTime from a date (all-day event).
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Creates a RawEventTime from a UTC instant.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a RawEventTime from a datetime without zone.
    pub fn from_floating(naive: NaiveDateTime) -> Self {
        Self::Floating(naive)
    }

    /// Returns true if this is a date without a time component.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

/// A raw calendar event.
///
/// Only `start`, `end`, `summary` and `description` take part in analysis;
/// `uid` and `location` are carried along for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Unique identifier, when the source provides one.
    pub uid: Option<String>,

    /// When the event starts.
    pub start: Option<RawEventTime>,

    /// When the event ends.
    pub end: Option<RawEventTime>,

    /// The event title/summary.
    pub summary: Option<String>,

    /// The event description.
    pub description: Option<String>,

    /// The event location.
    pub location: Option<String>,
}

impl RawEvent {
    /// Creates an event with the given start marker and nothing else.
    pub fn new(start: RawEventTime) -> Self {
        Self {
            start: Some(start),
            ..Default::default()
        }
    }

    /// Returns the summary text, or an empty string when absent.
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    /// Returns true if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.start.is_some_and(|s| s.is_all_day())
    }

    /// Builder method to set the uid.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Builder method to set the end marker.
    pub fn with_end(mut self, end: RawEventTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
