//! Core types for quarter-calendar

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// One academic session
///
/// The two summer sessions are distinct terms with their own keys, but they
/// share a single set of instruction markers in the published calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Term {
    /// Fall quarter (opens the academic year)
    Fall,
    /// Winter quarter
    Winter,
    /// Spring quarter
    Spring,
    /// Summer session 1
    SummerSession1,
    /// Summer session 2
    SummerSession2,
}

impl Term {
    /// All terms of an academic year, in the order they are fetched
    pub const ACADEMIC_YEAR: [Term; 5] = [
        Term::Fall,
        Term::Winter,
        Term::Spring,
        Term::SummerSession1,
        Term::SummerSession2,
    ];

    /// Canonical name used in quarter keys (`fall`, `summerSession1`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Fall => "fall",
            Term::Winter => "winter",
            Term::Spring => "spring",
            Term::SummerSession1 => "summerSession1",
            Term::SummerSession2 => "summerSession2",
        }
    }

    /// Lower-case token searched for in event summaries
    ///
    /// Both summer sessions fold to `"summer"`.
    pub fn search_token(&self) -> &'static str {
        match self {
            Term::SummerSession1 | Term::SummerSession2 => "summer",
            other => other.as_str(),
        }
    }

    /// Calendar year this term falls in, given the fall year of its academic year
    pub fn calendar_year(&self, base_fall_year: i32) -> i32 {
        match self {
            Term::Fall => base_fall_year,
            _ => base_fall_year + 1,
        }
    }

    /// Quarter key for this term in the given calendar year (e.g. `fall2024`)
    pub fn key(&self, year: i32) -> String {
        format!("{}{}", self.as_str(), year)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known term
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown term: {0}")]
pub struct UnknownTerm(pub String);

impl std::str::FromStr for Term {
    type Err = UnknownTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Term::ACADEMIC_YEAR
            .into_iter()
            .find(|term| term.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTerm(s.to_string()))
    }
}

/// Academic year identified by the calendar year its fall quarter starts in
///
/// Displays as the `YYYY-YYYY` label used in calendar document URLs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AcademicYear {
    fall_year: i32,
}

impl AcademicYear {
    /// Academic year starting with the fall quarter of `fall_year`
    pub fn new(fall_year: i32) -> Self {
        Self { fall_year }
    }

    /// Academic year that `term` of calendar year `year` belongs to
    ///
    /// Fall opens an academic year; every other term closes the one that
    /// started the previous fall.
    ///
    /// ```
    /// use quarter_calendar::{AcademicYear, Term};
    ///
    /// assert_eq!(AcademicYear::for_term(Term::Fall, 2024).to_string(), "2024-2025");
    /// assert_eq!(AcademicYear::for_term(Term::Winter, 2025).to_string(), "2024-2025");
    /// ```
    pub fn for_term(term: Term, year: i32) -> Self {
        match term {
            Term::Fall => Self::new(year),
            _ => Self::new(year - 1),
        }
    }

    /// Calendar year of the fall quarter
    pub fn fall_year(&self) -> i32 {
        self.fall_year
    }
}

impl std::fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.fall_year, self.fall_year + 1)
    }
}

#[allow(clippy::expect_used)]
static QUARTER_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(fall|winter|spring|summerSession1|summerSession2)(\d{4})$")
        .expect("quarter key pattern is valid")
});

/// Split a quarter key such as `winter2025` into its term and calendar year
///
/// Returns `None` for anything that is not a known term followed by a
/// four-digit year.
pub fn parse_quarter_key(key: &str) -> Option<(Term, i32)> {
    let captures = QUARTER_KEY.captures(key)?;
    let term = captures.get(1)?.as_str().parse().ok()?;
    let year = captures.get(2)?.as_str().parse().ok()?;
    Some((term, year))
}
