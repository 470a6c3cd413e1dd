//! Locating a term's instruction window and holidays in a calendar document

use crate::calendar::CalendarDocument;
use crate::types::Term;
use chrono::NaiveDateTime;

/// Dates found for one term
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDates {
    /// Start of the "instruction begins" event, if found
    pub start: Option<NaiveDateTime>,
    /// Start of the "instruction ends" event, if found
    pub end: Option<NaiveDateTime>,
    /// Holidays inside `[start, end]` as `YYYYMMDD`, in document order
    pub excluded_dates: Vec<String>,
}

/// Scan `document` for the instruction window and holidays of `term`
///
/// An event marks the start when its summary mentions "instruction", "begin"
/// and the term; the end when it mentions "instruction", "end" and the term.
/// When several events match, the last one in document order wins.
///
/// Any event whose summary contains "day" is a holiday candidate, except the
/// "Fifteenth Day" enrollment census. Candidates outside the window are
/// dropped; if either boundary is missing, no holidays are reported.
pub fn extract_quarter_dates(document: &CalendarDocument, term: Term) -> ExtractedDates {
    let token = term.search_token();

    let mut start = None;
    let mut end = None;
    let mut holidays = Vec::new();

    for event in document.iter() {
        let summary = event.summary_text().to_lowercase();

        if summary.contains("instruction") && summary.contains(token) {
            if summary.contains("begin") {
                start = event.start;
            }
            if summary.contains("end") {
                end = event.start;
            }
        }

        if summary.contains("day") && !summary.contains("fift") {
            holidays.extend(event.start);
        }
    }

    let excluded_dates = match (start, end) {
        (Some(start), Some(end)) => holidays
            .into_iter()
            .filter(|holiday| (start..=end).contains(holiday))
            .map(format_excluded_date)
            .collect(),
        _ => Vec::new(),
    };

    ExtractedDates {
        start,
        end,
        excluded_dates,
    }
}

/// Format a date as `YYYYMMDD` from its own calendar components
pub fn format_excluded_date(date: NaiveDateTime) -> String {
    date.format("%Y%m%d").to_string()
}
