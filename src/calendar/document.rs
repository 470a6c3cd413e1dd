//! Decoded academic calendar documents
//!
//! Only `VEVENT` components are kept. For each event we read the `UID`,
//! `SUMMARY` and `DTSTART` properties; everything else in the document is
//! ignored.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use tracing::warn;

/// Summary of a calendar event as it appeared in the document
///
/// A plain `SUMMARY:` line decodes to [`Summary::Text`]; a line carrying
/// parameters (`SUMMARY;LANGUAGE=en-us:`) keeps them alongside the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Bare text value
    Text(String),
    /// Value wrapped together with its property parameters
    Parameterized {
        /// Text value
        value: String,
        /// Property parameters, e.g. `("LANGUAGE", ["en-us"])`
        params: Vec<(String, Vec<String>)>,
    },
}

impl Summary {
    /// Plain text of the summary, whatever its representation
    pub fn text(&self) -> &str {
        match self {
            Summary::Text(text) => text,
            Summary::Parameterized { value, .. } => value,
        }
    }
}

impl From<&str> for Summary {
    fn from(text: &str) -> Self {
        Summary::Text(text.to_string())
    }
}

/// One `VEVENT` of a calendar document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event identifier (`UID`, or a positional key when the event has none)
    pub uid: String,
    /// Event summary, if present
    pub summary: Option<Summary>,
    /// Start as wall-clock date/time in the calendar's own time zone
    pub start: Option<NaiveDateTime>,
}

impl CalendarEvent {
    /// Build an event with a plain summary
    pub fn new(uid: impl Into<String>, summary: &str, start: Option<NaiveDateTime>) -> Self {
        Self {
            uid: uid.into(),
            summary: Some(Summary::from(summary)),
            start,
        }
    }

    /// Summary text, or `""` when the event has none
    pub fn summary_text(&self) -> &str {
        self.summary.as_ref().map(Summary::text).unwrap_or("")
    }
}

/// Calendar events of one academic year, keyed by identifier in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDocument {
    events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    /// Build a document from events in order
    ///
    /// An event whose identifier was already seen replaces the earlier event
    /// but keeps its position.
    pub fn from_events(events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        let mut document = Self::default();
        for event in events {
            document.insert(event);
        }
        document
    }

    /// Decode iCalendar text
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the text is not an iCalendar document.
    /// An event whose `DTSTART` is not a valid date or date-time is kept
    /// without a start.
    pub fn parse(input: &str) -> Result<Self> {
        let mut document = Self::default();
        let mut calendars = 0usize;

        for calendar in ical::IcalParser::new(input.as_bytes()) {
            let calendar = calendar?;
            calendars += 1;

            for event in &calendar.events {
                let position = document.events.len();
                document.insert(decode_event(event, position));
            }
        }

        if calendars == 0 && !input.trim().is_empty() {
            return Err(Error::Parse("no VCALENDAR component found".to_string()));
        }

        Ok(document)
    }

    /// Event with the given identifier
    pub fn get(&self, uid: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.uid == uid)
    }

    /// Events in document order
    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the document has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn insert(&mut self, event: CalendarEvent) {
        match self.events.iter_mut().find(|existing| existing.uid == event.uid) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }
}

fn decode_event(event: &IcalEvent, position: usize) -> CalendarEvent {
    let mut uid = None;
    let mut summary = None;
    let mut start = None;

    for property in &event.properties {
        let name = property.name.as_str();
        if name.eq_ignore_ascii_case("UID") {
            uid = property.value.clone();
        } else if name.eq_ignore_ascii_case("SUMMARY") {
            summary = decode_summary(property);
        } else if name.eq_ignore_ascii_case("DTSTART")
            && let Some(value) = property.value.as_deref()
        {
            start = parse_date_time(value);
            if start.is_none() {
                warn!(position, value, "ignoring invalid DTSTART");
            }
        }
    }

    CalendarEvent {
        uid: uid.unwrap_or_else(|| format!("event-{}", position)),
        summary,
        start,
    }
}

fn decode_summary(property: &Property) -> Option<Summary> {
    let value = unescape_text(property.value.as_deref()?);
    match &property.params {
        Some(params) if !params.is_empty() => Some(Summary::Parameterized {
            value,
            params: params.clone(),
        }),
        _ => Some(Summary::Text(value)),
    }
}

/// Parse a `DATE` or `DATE-TIME` value into wall-clock components
///
/// A trailing `Z` is dropped and `TZID` parameters are not applied, so the
/// result always carries the date printed in the document.
fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let value = value.strip_suffix('Z').unwrap_or(value);

    if value.len() == 8 {
        return NaiveDate::parse_from_str(value, "%Y%m%d")
            .ok()?
            .and_hms_opt(0, 0, 0);
    }

    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()
}

fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
