//! Percentile-band outlier detection and winsorization.
//!
//! Thresholds come from the unclamped series; values strictly outside the
//! band are flagged and, in the winsorized copy, clamped to the threshold
//! they violate.

use crate::error::{AnalysisError, Result};
use crate::utils::stats::percentile;

/// Lower and upper percentile thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBand {
    /// Values strictly below this are low outliers.
    pub lower: f64,
    /// Values strictly above this are high outliers.
    pub upper: f64,
}

impl OutlierBand {
    /// Build the band from the `lower_q` and `upper_q` percentiles of
    /// `series` (each in `[0, 1]`).
    pub fn from_percentiles(series: &[f64], lower_q: f64, upper_q: f64) -> Result<Self> {
        if series.is_empty() {
            return Err(AnalysisError::EmptyData);
        }
        if !(0.0..=1.0).contains(&lower_q) || !(0.0..=1.0).contains(&upper_q) || lower_q > upper_q
        {
            return Err(AnalysisError::InvalidParameter(format!(
                "percentile band must satisfy 0 <= lower <= upper <= 1, got {lower_q}..{upper_q}"
            )));
        }
        Ok(Self {
            lower: percentile(series, lower_q),
            upper: percentile(series, upper_q),
        })
    }

    /// 1st to 99th percentile band.
    pub fn p1_p99(series: &[f64]) -> Result<Self> {
        Self::from_percentiles(series, 0.01, 0.99)
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value > self.upper || value < self.lower
    }

    /// Per-point outlier flags.
    pub fn flags(&self, series: &[f64]) -> Vec<bool> {
        series.iter().map(|&x| self.is_outlier(x)).collect()
    }

    /// Number of flagged points.
    pub fn outlier_count(&self, series: &[f64]) -> usize {
        series.iter().filter(|&&x| self.is_outlier(x)).count()
    }

    /// Copy of `series` with flagged values clamped to the band.
    pub fn winsorize(&self, series: &[f64]) -> Vec<f64> {
        series
            .iter()
            .map(|&x| {
                if x > self.upper {
                    self.upper
                } else if x < self.lower {
                    self.lower
                } else {
                    x
                }
            })
            .collect()
    }
}

/// Indices of the `k` finite values with the largest magnitude, in
/// ascending index order. NaN entries never qualify.
pub fn largest_residuals(values: &[f64], k: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..values.len()).filter(|&i| values[i].is_finite()).collect();
    ranked.sort_by(|&a, &b| values[b].abs().total_cmp(&values[a].abs()).then(a.cmp(&b)));
    ranked.truncate(k);
    ranked.sort_unstable();
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spiked_series() -> Vec<f64> {
        let mut series = vec![100.0; 36];
        series[30] += 10.0;
        series
    }

    #[test]
    fn spike_is_flagged_and_capped() {
        let series = spiked_series();
        let band = OutlierBand::p1_p99(&series).unwrap();

        // sorted: 35 x 100.0, then 110.0; position 0.99 * 35 = 34.65
        assert_relative_eq!(band.upper, 100.0 + 0.65 * 10.0, epsilon = 1e-9);
        assert_relative_eq!(band.lower, 100.0);
        assert_eq!(band.outlier_count(&series), 1);

        let capped = band.winsorize(&series);
        assert_relative_eq!(capped[30], band.upper);
        assert_eq!(capped[0], 100.0);
    }

    #[test]
    fn low_values_clamp_to_lower() {
        let mut series: Vec<f64> = (0..50).map(|i| 200.0 + i as f64).collect();
        series[10] = -500.0;
        let band = OutlierBand::p1_p99(&series).unwrap();

        let flags = band.flags(&series);
        assert!(flags[10]);
        let capped = band.winsorize(&series);
        assert_relative_eq!(capped[10], band.lower);
        assert!(capped.iter().all(|&v| v >= band.lower && v <= band.upper));
    }

    #[test]
    fn constant_series_has_no_outliers() {
        let series = vec![7.0; 20];
        let band = OutlierBand::p1_p99(&series).unwrap();
        assert_eq!(band.outlier_count(&series), 0);
        assert_eq!(band.winsorize(&series), series);
    }

    #[test]
    fn rejects_bad_band() {
        assert!(matches!(
            OutlierBand::p1_p99(&[]),
            Err(AnalysisError::EmptyData)
        ));
        assert!(OutlierBand::from_percentiles(&[1.0], 0.9, 0.1).is_err());
        assert!(OutlierBand::from_percentiles(&[1.0], -0.1, 0.5).is_err());
    }

    #[test]
    fn largest_residuals_skips_nan() {
        let residuals = [f64::NAN, 1.0, -9.0, 3.0, f64::NAN, 8.0, -0.5];
        assert_eq!(largest_residuals(&residuals, 3), vec![2, 3, 5]);
        assert_eq!(largest_residuals(&residuals, 10), vec![1, 2, 3, 5, 6]);
        assert!(largest_residuals(&[f64::NAN], 3).is_empty());
    }
}
