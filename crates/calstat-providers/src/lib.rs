//! Calendar sources for calstat.
//!
//! - [`ics::parse_ics_content`] turns iCalendar text into raw events
//! - [`IcsFileSource`] is a [`CalendarSource`](calstat_core::CalendarSource)
//!   backed by a local `.ics` file

pub mod file;
pub mod ics;

pub use file::IcsFileSource;
pub use ics::parse_ics_content;
