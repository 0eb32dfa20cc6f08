use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{EngineError, ResultEngine};

/// A calendar month, written `yyyy-mm` on the wire and in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Caller guarantees `month` is in `1..=12`.
    pub(crate) const fn new_unchecked(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month a date falls in.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1-based.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Shifts by `offset` months, rolling the year over in both directions.
    #[must_use]
    pub fn add_months(self, offset: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + offset;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// `true` when `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The given day of this month.
    pub fn day(self, day: u32) -> ResultEngine<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .ok_or_else(|| EngineError::InvalidDate(format!("{self}-{day:02}")))
    }

    /// Short English label, e.g. `Mar 2026`.
    #[must_use]
    pub fn label(self) -> String {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        format!("{} {}", NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_displays() {
        assert_eq!(key("2026-03").to_string(), "2026-03");
        assert_eq!(key("2026-03").month(), 3);
        assert!("2026-13".parse::<MonthKey>().is_err());
        assert!("2026-00".parse::<MonthKey>().is_err());
        assert!("2026/03".parse::<MonthKey>().is_err());
        assert!("26-03".parse::<MonthKey>().is_err());
        assert!("".parse::<MonthKey>().is_err());
    }

    #[test]
    fn add_months_rolls_over_years() {
        assert_eq!(key("2026-03").add_months(8), key("2026-11"));
        assert_eq!(key("2026-11").add_months(3), key("2027-02"));
        assert_eq!(key("2026-01").add_months(-1), key("2025-12"));
        assert_eq!(key("2026-12").add_months(0), key("2026-12"));
        assert_eq!(key("2026-06").add_months(24), key("2028-06"));
    }

    #[test]
    fn contains_and_day() {
        let march = key("2026-03");
        let fifth = march.day(5).unwrap();
        assert_eq!(fifth, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert!(march.contains(fifth));
        assert!(!key("2026-04").contains(fifth));
        assert!(key("2026-02").day(30).is_err());
    }

    #[test]
    fn label_uses_short_month_name() {
        assert_eq!(key("2026-02").label(), "Feb 2026");
        assert_eq!(key("2026-12").label(), "Dec 2026");
    }
}
