//! Quarter windows and the ordered map of windows for an academic year

use crate::error::{Error, Result};
use crate::extraction::ExtractedDates;
use crate::types::{AcademicYear, Term};
use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where a quarter window came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterSource {
    /// Extracted from the published academic calendar
    #[default]
    Auto,
    /// Entered by hand (static quarter definitions)
    Manual,
}

/// Provenance of a quarter window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterMetadata {
    /// When the window was first assembled
    pub created_at: DateTime<Utc>,
    /// Where the dates came from
    pub source: QuarterSource,
    /// Academic year label, e.g. "2024-2025"
    pub academic_year: String,
    /// When the window was last refreshed
    pub last_updated: DateTime<Utc>,
}

/// Instruction window and holidays of one term
///
/// `start` and `end` are optional so windows loaded from elsewhere can be
/// represented as-is; windows built by [`assemble_quarter_window`] always
/// have both, with `start <= end`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterWindow {
    /// First day of instruction
    #[serde(default, deserialize_with = "wall_clock::deserialize")]
    pub start: Option<NaiveDateTime>,
    /// Last day of instruction
    #[serde(default, deserialize_with = "wall_clock::deserialize")]
    pub end: Option<NaiveDateTime>,
    /// Holidays within the window, as `YYYYMMDD`
    #[serde(default)]
    pub excluded_dates: Vec<String>,
    /// Provenance
    pub metadata: QuarterMetadata,
}

impl QuarterWindow {
    /// Both boundaries, if the window has them
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start?, self.end?))
    }

    /// Whether `at` falls inside the window, boundaries included
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.bounds().is_some_and(|(start, end)| start <= at && at <= end)
    }
}

/// Validate extracted dates and attach provenance
///
/// # Errors
/// - [`Error::MissingDates`] if either boundary was not found
/// - [`Error::InvertedWindow`] if the end precedes the start
pub fn assemble_quarter_window(
    dates: ExtractedDates,
    term: Term,
    year: i32,
    now: DateTime<Utc>,
) -> Result<QuarterWindow> {
    let (Some(start), Some(end)) = (dates.start, dates.end) else {
        return Err(Error::MissingDates { term, year });
    };

    if start > end {
        return Err(Error::InvertedWindow { term, year });
    }

    Ok(QuarterWindow {
        start: Some(start),
        end: Some(end),
        excluded_dates: dates.excluded_dates,
        metadata: QuarterMetadata {
            created_at: now,
            source: QuarterSource::Auto,
            academic_year: AcademicYear::for_term(term, year).to_string(),
            last_updated: now,
        },
    })
}

/// Window boundaries stored elsewhere may carry a UTC offset
/// (`2024-09-26T07:00:00.000Z`); only their wall-clock part is kept.
mod wall_clock {
    use chrono::{DateTime, NaiveDateTime};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(&text)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date-time '{}'", text)))
    }

    fn parse(text: &str) -> Option<NaiveDateTime> {
        if let Ok(at) = DateTime::parse_from_rfc3339(text) {
            return Some(at.naive_local());
        }
        text.parse().ok()
    }
}

/// Quarter windows keyed by quarter key (e.g. `fall2024`), in insertion order
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuartersMap {
    entries: IndexMap<String, QuarterWindow>,
}

impl QuartersMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a window, replacing (in place) any window already under `key`
    ///
    /// Returns the replaced window.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        window: QuarterWindow,
    ) -> Option<QuarterWindow> {
        self.entries.insert(key.into(), window)
    }

    /// Window stored under `key`
    pub fn get(&self, key: &str) -> Option<&QuarterWindow> {
        self.entries.get(key)
    }

    /// Whether a window is stored under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QuarterWindow)> {
        self.entries.iter().map(|(key, window)| (key.as_str(), window))
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, QuarterWindow)> for QuartersMap {
    fn from_iter<I: IntoIterator<Item = (K, QuarterWindow)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, window)| (key.into(), window))
                .collect(),
        }
    }
}
