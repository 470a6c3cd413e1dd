//! Choosing the quarter a schedule export should default to

use crate::quarter::QuartersMap;
use chrono::{Local, NaiveDateTime};

/// Key of the quarter to preselect at `now`
///
/// Windows without both boundaries are ignored. Among the rest, ordered by
/// start: the quarter in session, else the next one to begin, else the last
/// one. `None` only when no window is usable.
pub fn default_quarter(quarters: &QuartersMap, now: NaiveDateTime) -> Option<String> {
    let mut windows: Vec<(&str, NaiveDateTime, NaiveDateTime)> = quarters
        .iter()
        .filter_map(|(key, window)| window.bounds().map(|(start, end)| (key, start, end)))
        .collect();
    windows.sort_by_key(|&(_, start, _)| start);

    windows
        .iter()
        .find(|&&(_, start, end)| start <= now && now <= end)
        .or_else(|| windows.iter().find(|&&(_, start, _)| start > now))
        .or_else(|| windows.last())
        .map(|&(key, _, _)| key.to_string())
}

/// [`default_quarter`] at the current local time
pub fn current_default_quarter(quarters: &QuartersMap) -> Option<String> {
    default_quarter(quarters, Local::now().naive_local())
}
