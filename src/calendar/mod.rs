//! Academic calendar acquisition
//!
//! - [`document`] decodes iCalendar text into ordered [`CalendarEvent`]s
//! - [`fetcher`] downloads the document for an academic year

/// Decoded calendar documents
pub mod document;
/// HTTP calendar source
pub mod fetcher;

pub use document::{CalendarDocument, CalendarEvent, Summary};
pub use fetcher::{CalendarFetcher, CalendarSource};
