//! Forecast result structure for holding predictions.

use super::month::YearMonth;
use crate::error::{AnalysisError, Result};

/// Point predictions for consecutive future months.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    months: Vec<YearMonth>,
    point: Vec<f64>,
}

impl Forecast {
    /// Create a forecast from matching months and predictions.
    pub fn new(months: Vec<YearMonth>, point: Vec<f64>) -> Result<Self> {
        if months.len() != point.len() {
            return Err(AnalysisError::DimensionMismatch {
                expected: months.len(),
                got: point.len(),
            });
        }
        Ok(Self { months, point })
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Check if forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    /// Predicted values in horizon order.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Final step of the horizon.
    pub fn last(&self) -> Option<(YearMonth, f64)> {
        self.months.last().copied().zip(self.point.last().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (YearMonth, f64)> + '_ {
        self.months.iter().copied().zip(self.point.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_lengths() {
        let start = YearMonth::new(2024, 1).unwrap();
        assert!(Forecast::new(vec![start], vec![]).is_err());

        let forecast = Forecast::new(vec![start, start.succ()], vec![1.0, 2.0]).unwrap();
        assert_eq!(forecast.horizon(), 2);
        assert_eq!(forecast.last(), Some((start.succ(), 2.0)));
    }

    #[test]
    fn empty_forecast() {
        let forecast = Forecast::default();
        assert!(forecast.is_empty());
        assert_eq!(forecast.last(), None);
    }
}
