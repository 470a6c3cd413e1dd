//! Quarter pipeline: fetch → extract → assemble, per term and per academic year
//!
//! [`AcademicCalendar`] is the entry point the rest of the application uses.
//! A single-term run ([`AcademicCalendar::fetch_quarter_data`]) returns its
//! error to the caller; an academic-year run
//! ([`AcademicCalendar::fetch_academic_year_data`]) runs every term in turn,
//! records each outcome and keeps going when a term fails.

use crate::calendar::{CalendarFetcher, CalendarSource};
use crate::config::CalendarConfig;
use crate::error::Result;
use crate::extraction::extract_quarter_dates;
use crate::observer::{FetchEvent, FetchObserver, TracingObserver};
use crate::quarter::{QuarterWindow, QuartersMap, assemble_quarter_window};
use crate::types::Term;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};

/// Result of one term's pipeline run inside an academic year fetch
#[derive(Debug)]
pub struct TermOutcome {
    /// The term that was fetched
    pub term: Term,
    /// Calendar year of the term
    pub year: i32,
    /// Quarter key, e.g. "spring2025"
    pub key: String,
    /// The assembled window, or why it could not be built
    pub result: Result<QuarterWindow>,
}

/// Fetches quarter windows from the published academic calendar
///
/// Holds no state between calls; every call downloads the calendar again.
#[derive(Clone)]
pub struct AcademicCalendar {
    /// Where calendar documents come from
    source: Arc<dyn CalendarSource>,

    /// Receives batch progress
    observer: Arc<dyn FetchObserver>,
}

impl AcademicCalendar {
    /// Create a pipeline backed by HTTP with the given configuration
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration is invalid
    pub fn new(config: CalendarConfig) -> Result<Self> {
        let fetcher = CalendarFetcher::new(config)?;
        Ok(Self::with_source(Arc::new(fetcher)))
    }

    /// Create a pipeline over any calendar source
    pub fn with_source(source: Arc<dyn CalendarSource>) -> Self {
        Self {
            source,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the progress observer (default: [`TracingObserver`])
    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Fetch the calendar and build the window for one term
    ///
    /// # Errors
    /// Any fetch or decode error from the source, or
    /// [`Error::MissingDates`](crate::Error::MissingDates) /
    /// [`Error::InvertedWindow`](crate::Error::InvertedWindow) if the document
    /// has no usable instruction markers for the term.
    pub async fn fetch_quarter_data(&self, term: Term, year: i32) -> Result<QuarterWindow> {
        let result = self.run_pipeline(term, year).await;
        if let Err(e) = &result {
            error!(%term, year, error = %e, "Error fetching quarter data");
        }
        result
    }

    /// Run the pipeline for every term of the academic year starting in fall `base_year`
    ///
    /// Terms run one after another in [`Term::ACADEMIC_YEAR`] order. Fall uses
    /// `base_year`; the other terms use `base_year + 1`.
    pub async fn fetch_academic_year_outcomes(&self, base_year: i32) -> Vec<TermOutcome> {
        let mut outcomes = Vec::with_capacity(Term::ACADEMIC_YEAR.len());

        for term in Term::ACADEMIC_YEAR {
            let year = term.calendar_year(base_year);
            let key = term.key(year);

            self.observer
                .on_event(&FetchEvent::TermStarted { key: key.clone() });

            let result = self.run_pipeline(term, year).await;

            let event = match &result {
                Ok(window) => FetchEvent::TermFetched {
                    key: key.clone(),
                    excluded_dates: window.excluded_dates.len(),
                },
                Err(e) => FetchEvent::TermFailed {
                    key: key.clone(),
                    error: e.to_string(),
                },
            };
            self.observer.on_event(&event);

            outcomes.push(TermOutcome {
                term,
                year,
                key,
                result,
            });
        }

        let fetched = outcomes.iter().filter(|o| o.result.is_ok()).count();
        self.observer.on_event(&FetchEvent::BatchCompleted {
            base_year,
            fetched,
            failed: outcomes.len() - fetched,
        });

        outcomes
    }

    /// Fetch every term of an academic year, keeping only the terms that succeeded
    ///
    /// Never fails: a term whose pipeline errors is reported to the observer
    /// and left out of the map, which may therefore be partial or empty.
    pub async fn fetch_academic_year_data(&self, base_year: i32) -> QuartersMap {
        self.fetch_academic_year_outcomes(base_year)
            .await
            .into_iter()
            .filter_map(|outcome| outcome.result.ok().map(|window| (outcome.key, window)))
            .collect()
    }

    async fn run_pipeline(&self, term: Term, year: i32) -> Result<QuarterWindow> {
        let document = self.source.fetch_calendar(term, year).await?;
        debug!(%term, year, events = document.len(), "scanning calendar");

        let dates = extract_quarter_dates(&document, term);
        assemble_quarter_window(dates, term, year, Utc::now())
    }
}

impl std::fmt::Debug for AcademicCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcademicCalendar").finish_non_exhaustive()
    }
}
