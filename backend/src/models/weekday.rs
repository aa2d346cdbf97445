use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week as a finite, ordered category.
///
/// The derived ordering is the canonical Monday → Sunday order used for every
/// table and chart, independent of input order or locale.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Full English day name with fixed capitalization.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Zero-based position in the canonical order (Monday = 0).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Weekday of a naive date-time.
    pub fn of(timestamp: &chrono::NaiveDateTime) -> Self {
        use chrono::Datelike;
        timestamp.weekday().into()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a weekday.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown weekday '{0}'")]
pub struct ParseWeekdayError(pub String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .iter()
            .copied()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == needle || name[..3] == needle
            })
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}
