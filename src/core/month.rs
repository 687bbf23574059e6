//! Calendar month keys.

use crate::error::{AnalysisError, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// English month abbreviations in calendar order, independent of locale.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month key. `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(AnalysisError::TimestampError(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(AnalysisError::TimestampError(format!(
                "year {year} is out of range"
            )));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given date or timestamp.
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based position of the month within its year.
    pub fn month_index(&self) -> usize {
        (self.month - 1) as usize
    }

    /// The following calendar month.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Advance by `n` calendar months.
    pub fn add_months(self, n: u32) -> Self {
        let total = self.year as i64 * 12 + (self.month - 1) as i64 + n as i64;
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MAX)
    }

    /// Three-letter English abbreviation, e.g. `"Mar"`.
    pub fn abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[self.month_index()]
    }

    /// Position on a continuous year axis: January 2020 is `2020.0`,
    /// July 2020 is `2020.5`.
    pub fn fractional_year(&self) -> f64 {
        self.year as f64 + self.month_index() as f64 / 12.0
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_invalid_month() {
        assert!(YearMonth::new(2020, 0).is_err());
        assert!(YearMonth::new(2020, 13).is_err());
        assert!(YearMonth::new(2020, 12).is_ok());
    }

    #[test]
    fn succ_rolls_over_year() {
        let dec = YearMonth::new(2019, 12).unwrap();
        assert_eq!(dec.succ(), YearMonth::new(2020, 1).unwrap());
        let mar = YearMonth::new(2020, 3).unwrap();
        assert_eq!(mar.succ(), YearMonth::new(2020, 4).unwrap());
    }

    #[test]
    fn add_months_matches_repeated_succ() {
        let start = YearMonth::new(2021, 11).unwrap();
        let mut expected = start;
        for n in 0..30 {
            assert_eq!(start.add_months(n), expected);
            expected = expected.succ();
        }
    }

    #[test]
    fn ordering_is_chronological() {
        let a = YearMonth::new(2019, 12).unwrap();
        let b = YearMonth::new(2020, 1).unwrap();
        let c = YearMonth::new(2020, 2).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn abbreviation_and_display() {
        let ym = YearMonth::new(2005, 9).unwrap();
        assert_eq!(ym.abbreviation(), "Sep");
        assert_eq!(ym.to_string(), "2005-09");
        assert_eq!(ym.first_day(), NaiveDate::from_ymd_opt(2005, 9, 1).unwrap());
    }

    #[test]
    fn fractional_year_positions() {
        assert_relative_eq!(YearMonth::new(2020, 1).unwrap().fractional_year(), 2020.0);
        assert_relative_eq!(YearMonth::new(2020, 7).unwrap().fractional_year(), 2020.5);
    }
}
