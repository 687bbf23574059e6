//! Monthly series keyed by calendar month.

use super::month::YearMonth;
use crate::error::{AnalysisError, Result};
use chrono::Datelike;
use std::collections::BTreeMap;

/// A sparse monthly series: strictly increasing month keys with one value
/// each. Months without observations are absent rather than zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlySeries {
    months: Vec<YearMonth>,
    values: Vec<f64>,
}

impl MonthlySeries {
    /// Create a series, validating key order and lengths.
    pub fn new(months: Vec<YearMonth>, values: Vec<f64>) -> Result<Self> {
        if months.len() != values.len() {
            return Err(AnalysisError::DimensionMismatch {
                expected: months.len(),
                got: values.len(),
            });
        }
        for i in 1..months.len() {
            if months[i] <= months[i - 1] {
                return Err(AnalysisError::TimestampError(
                    "months must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { months, values })
    }

    /// Consecutive months starting at `start`.
    pub fn contiguous(start: YearMonth, values: Vec<f64>) -> Self {
        let months = (0..values.len() as u32).map(|i| start.add_months(i)).collect();
        Self { months, values }
    }

    /// Count observations per calendar month.
    pub fn count_by_month<D: Datelike>(dates: &[D]) -> Self {
        let mut counts: BTreeMap<YearMonth, usize> = BTreeMap::new();
        for date in dates {
            *counts.entry(YearMonth::from_date(date)).or_insert(0) += 1;
        }
        let (months, values) = counts
            .into_iter()
            .map(|(month, count)| (month, count as f64))
            .unzip();
        Self { months, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first_month(&self) -> Option<YearMonth> {
        self.months.first().copied()
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.months.last().copied()
    }

    /// Value recorded for `month`, if any.
    pub fn get(&self, month: YearMonth) -> Option<f64> {
        self.months
            .binary_search(&month)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Points at or after `bound`.
    pub fn since(&self, bound: YearMonth) -> Self {
        let start = self.months.partition_point(|m| *m < bound);
        Self {
            months: self.months[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// The last `n` points (all of them when the series is shorter).
    pub fn trailing(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        Self {
            months: self.months[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// Same keys with replacement values.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.len() {
            return Err(AnalysisError::DimensionMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            months: self.months.clone(),
            values,
        })
    }

    /// Iterate over `(month, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (YearMonth, f64)> + '_ {
        self.months.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn new_rejects_unordered_months() {
        let result = MonthlySeries::new(vec![ym(2020, 2), ym(2020, 1)], vec![1.0, 2.0]);
        assert!(matches!(result, Err(AnalysisError::TimestampError(_))));

        let result = MonthlySeries::new(vec![ym(2020, 1), ym(2020, 1)], vec![1.0, 2.0]);
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let result = MonthlySeries::new(vec![ym(2020, 1)], vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(AnalysisError::DimensionMismatch {
                expected: 1,
                got: 2
            })
        ));
    }

    #[test]
    fn count_by_month_groups_and_sorts() {
        let dates = vec![
            date(2021, 3, 5),
            date(2020, 1, 1),
            date(2021, 3, 30),
            date(2020, 1, 31),
            date(2020, 1, 15),
        ];
        let series = MonthlySeries::count_by_month(&dates);
        assert_eq!(series.months(), &[ym(2020, 1), ym(2021, 3)]);
        assert_eq!(series.values(), &[3.0, 2.0]);
    }

    #[test]
    fn missing_months_are_absent_not_zero() {
        let dates = vec![date(2020, 1, 1), date(2020, 4, 1)];
        let series = MonthlySeries::count_by_month(&dates);
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(ym(2020, 2)), None);
    }

    #[test]
    fn since_and_trailing() {
        let series = MonthlySeries::contiguous(ym(1999, 11), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let recent = series.since(ym(2000, 1));
        assert_eq!(recent.first_month(), Some(ym(2000, 1)));
        assert_eq!(recent.values(), &[3.0, 4.0, 5.0]);

        let tail = series.trailing(2);
        assert_eq!(tail.values(), &[4.0, 5.0]);
        assert_eq!(series.trailing(10).len(), 5);
    }

    #[test]
    fn with_values_keeps_keys() {
        let series = MonthlySeries::contiguous(ym(2020, 1), vec![1.0, 2.0]);
        let replaced = series.with_values(vec![9.0, 8.0]).unwrap();
        assert_eq!(replaced.months(), series.months());
        assert!(series.with_values(vec![1.0]).is_err());
    }
}
