//! Error types for quarter-calendar
//!
//! This module provides:
//! - The crate-wide [`Error`] enum covering every failure of the quarter pipeline
//! - HTTP status code mapping for the web layer that embeds the crate
//! - Structured error responses with machine-readable error codes

use crate::types::Term;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quarter-calendar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for quarter-calendar
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// The remote served a placeholder page instead of calendar data
    #[error("calendar not available for {academic_year}")]
    NotPublished {
        /// Academic year label (e.g. "2026-2027")
        academic_year: String,
    },

    /// The remote has no calendar document for the academic year
    #[error("calendar not found for {academic_year}")]
    NotFound {
        /// Academic year label (e.g. "2026-2027")
        academic_year: String,
    },

    /// Transport failure, timeout or unexpected HTTP status
    #[error("failed to fetch calendar: {0}")]
    Fetch(String),

    /// The calendar document could not be decoded
    #[error("failed to parse calendar: {0}")]
    Parse(String),

    /// The document did not contain instruction begin/end markers for the term
    #[error("could not find {term} {year} dates in calendar")]
    MissingDates {
        /// The term that was searched for
        term: Term,
        /// Calendar year of the term
        year: i32,
    },

    /// The term's instruction end precedes its instruction start
    #[error("{term} {year} instruction ends before it begins")]
    InvertedWindow {
        /// The term that was searched for
        term: Term,
        /// Calendar year of the term
        year: i32,
    },
}

impl Error {
    /// Shorthand for a configuration error on a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Fetch(e.to_string())
    }
}

impl From<ical::parser::ParserError> for Error {
    fn from(e: ical::parser::ParserError) -> Self {
        Error::Parse(e.to_string())
    }
}

/// API error response format
///
/// The web layer returns this body when a quarter lookup fails.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "calendar_not_found",
///     "message": "calendar not found for 2026-2027",
///     "details": {
///       "academic_year": "2026-2027"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "calendar_not_found")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Attach structured context to the error
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.error.details = Some(details);
        self
    }

    /// Create a "quarter not found" error for an unknown quarter key
    pub fn quarter_not_found(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new("quarter_not_found", format!("quarter {} not found", key))
            .with_details(serde_json::json!({ "quarter": key }))
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            Error::Config { .. } => 500,
            Error::NotFound { .. } => 404,
            Error::MissingDates { .. } | Error::InvertedWindow { .. } => 422,
            // upstream calendar host misbehaved
            Error::Fetch(_) | Error::Parse(_) => 502,
            Error::NotPublished { .. } => 503,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::NotPublished { .. } => "calendar_not_published",
            Error::NotFound { .. } => "calendar_not_found",
            Error::Fetch(_) => "calendar_fetch_failed",
            Error::Parse(_) => "calendar_parse_failed",
            Error::MissingDates { .. } => "quarter_dates_missing",
            Error::InvertedWindow { .. } => "quarter_window_inverted",
        }
    }
}

impl From<&Error> for ApiError {
    fn from(error: &Error) -> Self {
        let details = match error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({ "key": key })),
            Error::NotPublished { academic_year } | Error::NotFound { academic_year } => {
                Some(serde_json::json!({ "academic_year": academic_year }))
            }
            Error::MissingDates { term, year } | Error::InvertedWindow { term, year } => {
                Some(serde_json::json!({ "quarter": term.key(*year) }))
            }
            _ => None,
        };

        let api = ApiError::new(error.error_code(), error.to_string());
        match details {
            Some(details) => api.with_details(details),
            None => api,
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError::from(&error)
    }
}
