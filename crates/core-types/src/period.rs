use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How finely a `HistoryDate` was specified by the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatePrecision {
    /// `YYYY-MM`, anchored on the first day of the month.
    Month,
    /// `YYYY-MM-DD`.
    Day,
}

/// A validated point in time attached to a valuation.
///
/// The store writes history periods as `"YYYY-MM"` and expense dates as
/// `"YYYY-MM-DD"`; both are accepted. Anything else is rejected when parsed, so a
/// malformed date can never reach the calculations and silently reorder a history.
/// The original precision is kept so the value serialises back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryDate {
    date: NaiveDate,
    precision: DatePrecision,
}

impl HistoryDate {
    /// A month-precision period.
    pub fn month(year: i32, month: u32) -> Result<Self, CoreError> {
        let date = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CoreError::InvalidDate(format!("{year:04}-{month:02}")))?;
        Ok(Self {
            date,
            precision: DatePrecision::Month,
        })
    }

    /// A day-precision date.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            date,
            precision: DatePrecision::Day,
        }
    }

    /// The month containing `date`, at month precision.
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            date: date.with_day(1).unwrap_or(date),
            precision: DatePrecision::Month,
        }
    }

    /// The calendar date used for ordering. Month periods resolve to their first day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }
}

impl Ord for HistoryDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.precision.cmp(&other.precision))
    }
}

impl PartialOrd for HistoryDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for HistoryDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidDate(s.to_string());
        let parts: Vec<&str> = s.split('-').collect();

        match parts.as_slice() {
            [year, month] if is_digits(year, 4) && is_digits(month, 2) => {
                let year = year.parse::<i32>().map_err(|_| invalid())?;
                let month = month.parse::<u32>().map_err(|_| invalid())?;
                Self::month(year, month).map_err(|_| invalid())
            }
            [year, month, day] if is_digits(year, 4) && is_digits(month, 2) && is_digits(day, 2) => {
                let year = year.parse::<i32>().map_err(|_| invalid())?;
                let month = month.parse::<u32>().map_err(|_| invalid())?;
                let day = day.parse::<u32>().map_err(|_| invalid())?;
                NaiveDate::from_ymd_opt(year, month, day)
                    .map(Self::day)
                    .ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for HistoryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            DatePrecision::Month => write!(f, "{}", self.date.format("%Y-%m")),
            DatePrecision::Day => write!(f, "{}", self.date.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for HistoryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HistoryDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
