//! Progress reporting for academic year fetches
//!
//! The batch pipeline reports what it does through a [`FetchObserver`] rather
//! than logging directly, so callers can collect progress (or assert on it in
//! tests) without capturing log output. [`TracingObserver`] is the default and
//! forwards everything to `tracing`.

use tracing::{info, warn};

/// Something that happened while fetching an academic year
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchEvent {
    /// A term's pipeline is about to run
    TermStarted {
        /// Quarter key, e.g. "winter2025"
        key: String,
    },
    /// A term's window was assembled
    TermFetched {
        /// Quarter key
        key: String,
        /// Number of holidays inside the window
        excluded_dates: usize,
    },
    /// A term's pipeline failed; the batch continues
    TermFailed {
        /// Quarter key
        key: String,
        /// Error message
        error: String,
    },
    /// Every term has been attempted
    BatchCompleted {
        /// Fall year of the academic year
        base_year: i32,
        /// Terms that produced a window
        fetched: usize,
        /// Terms that failed
        failed: usize,
    },
}

/// Receives [`FetchEvent`]s from the batch pipeline
pub trait FetchObserver: Send + Sync {
    /// Called synchronously for every event, in order
    fn on_event(&self, event: &FetchEvent);
}

/// Observer that writes events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
    fn on_event(&self, event: &FetchEvent) {
        match event {
            FetchEvent::TermStarted { key } => info!(quarter = %key, "Fetching quarter"),
            FetchEvent::TermFetched {
                key,
                excluded_dates,
            } => info!(quarter = %key, excluded_dates, "Fetched quarter"),
            FetchEvent::TermFailed { key, error } => {
                warn!(quarter = %key, error = %error, "Failed to fetch quarter")
            }
            FetchEvent::BatchCompleted {
                base_year,
                fetched,
                failed,
            } => info!(base_year, fetched, failed, "Academic year fetch complete"),
        }
    }
}
