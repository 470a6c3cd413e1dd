//! # quarter-calendar
//!
//! Quarter dates for course schedule exports, taken from a university's
//! published academic calendar.
//!
//! For a given term the crate downloads the academic year's iCalendar file,
//! finds the "Instruction Begins" / "Instruction Ends" events for the term,
//! collects the holidays that fall in between, and picks which quarter a
//! schedule export should default to.
//!
//! ## Design
//!
//! - **Library-first** - No CLI or server; the web application embeds it
//! - **Partial results over failures** - An academic year fetch returns every
//!   quarter it could build and reports the rest to an observer
//! - **Stateless** - Nothing is cached between calls; persistence belongs to
//!   the caller
//!
//! ## Quick Start
//!
//! ```no_run
//! use quarter_calendar::{AcademicCalendar, CalendarConfig, Term, current_default_quarter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let calendar = AcademicCalendar::new(CalendarConfig::default())?;
//!
//!     // One quarter
//!     let fall = calendar.fetch_quarter_data(Term::Fall, 2024).await?;
//!     println!("fall 2024: {:?} - {:?}", fall.start, fall.end);
//!
//!     // The whole academic year, skipping quarters that are not published yet
//!     let quarters = calendar.fetch_academic_year_data(2024).await;
//!     println!("default: {:?}", current_default_quarter(&quarters));
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Calendar document download and decoding
pub mod calendar;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Instruction window and holiday extraction
pub mod extraction;
/// Progress reporting for academic year fetches
pub mod observer;
/// Per-term and per-academic-year quarter pipeline
pub mod pipeline;
/// Quarter windows and the quarters map
pub mod quarter;
/// Default quarter selection
pub mod selector;
/// Core types
pub mod types;

// Re-export commonly used types
pub use calendar::{CalendarDocument, CalendarEvent, CalendarFetcher, CalendarSource, Summary};
pub use config::{CalendarConfig, Config};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use extraction::{ExtractedDates, extract_quarter_dates};
pub use observer::{FetchEvent, FetchObserver, TracingObserver};
pub use pipeline::{AcademicCalendar, TermOutcome};
pub use quarter::{
    QuarterMetadata, QuarterSource, QuarterWindow, QuartersMap, assemble_quarter_window,
};
pub use selector::{current_default_quarter, default_quarter};
pub use types::{AcademicYear, Term, UnknownTerm, parse_quarter_key};

/// Academic year label (`"YYYY-YYYY"`) for a term in a calendar year
///
/// ```
/// use quarter_calendar::{Term, academic_year};
///
/// assert_eq!(academic_year(Term::Fall, 2024), "2024-2025");
/// assert_eq!(academic_year(Term::Spring, 2025), "2024-2025");
/// ```
pub fn academic_year(term: Term, year: i32) -> String {
    AcademicYear::for_term(term, year).to_string()
}
