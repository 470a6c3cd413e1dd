//! Academic calendar fixtures

/// Path the fetcher requests for an academic year under the mock server
pub fn calendar_path(label: &str) -> String {
    format!("/_files/SCI-tab/{}-academic-calendar.ics", label)
}

/// Build an iCalendar document from `(summary, YYYYMMDD)` pairs
///
/// Events get sequential UIDs in the order given.
pub fn ics(events: &[(&str, &str)]) -> String {
    let mut out = String::from(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test Registrar//Academic Calendar//EN\r\n",
    );
    for (i, (summary, date)) in events.iter().enumerate() {
        out.push_str("BEGIN:VEVENT\r\n");
        out.push_str(&format!("UID:event-{}@registrar.test\r\n", i));
        out.push_str(&format!("DTSTART;VALUE=DATE:{}\r\n", date));
        out.push_str(&format!("SUMMARY:{}\r\n", summary));
        out.push_str("END:VEVENT\r\n");
    }
    out.push_str("END:VCALENDAR\r\n");
    out
}

/// Every quarter of the 2024-2025 academic year plus the usual holidays
pub fn academic_year_2024_events() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Instruction Begins - Fall Quarter", "20240926"),
        ("Fifteenth Day of Instruction - Fall Quarter", "20241016"),
        ("Veterans Day", "20241111"),
        ("Thanksgiving Holiday", "20241128"),
        ("Instruction Ends - Fall Quarter", "20241213"),
        ("Instruction Begins - Winter Quarter", "20250106"),
        ("Martin Luther King Jr. Day", "20250120"),
        ("Presidents' Day", "20250217"),
        ("Instruction Ends - Winter Quarter", "20250314"),
        ("Instruction Begins - Spring Quarter", "20250331"),
        ("Memorial Day", "20250526"),
        ("Instruction Ends - Spring Quarter", "20250606"),
        ("Instruction Begins - Summer Session I", "20250630"),
        ("Independence Day", "20250704"),
        ("Instruction Ends - Summer Session II", "20250906"),
    ]
}

/// Placeholder page the calendar host serves for unpublished years
pub const NOT_PUBLISHED_HTML: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>Academic Calendar</title></head>\n<body><p>This calendar has not been published yet.</p></body>\n</html>\n";
