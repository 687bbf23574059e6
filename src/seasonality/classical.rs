//! Classical additive seasonal decomposition.
//!
//! The series is split into three components that sum to the input:
//! - Trend: centered moving average over one full period
//! - Seasonal: per-phase mean of the detrended series, centered on zero
//! - Residual: what remains after removing trend and seasonal
//!
//! The moving average needs `period / 2` points on each side, so trend and
//! residual are NaN at both ends. The seasonal component is defined
//! everywhere and repeats with the given period, phased from the first
//! observation.

use crate::error::{AnalysisError, Result};
use crate::utils::stats::variance;

/// Result of an additive decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Trend component (NaN at the edges).
    pub trend: Vec<f64>,
    /// Seasonal component.
    pub seasonal: Vec<f64>,
    /// Residual component (NaN at the edges).
    pub residual: Vec<f64>,
    /// Seasonal period used.
    pub period: usize,
}

impl Decomposition {
    /// One cycle of seasonal effects, phased from the first observation.
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal[..self.period.min(self.seasonal.len())]
    }

    /// Get the seasonal strength (0 to 1).
    /// Values close to 1 indicate strong seasonality.
    pub fn seasonal_strength(&self) -> f64 {
        strength(&self.seasonal, &self.residual)
    }

    /// Get the trend strength (0 to 1).
    /// Values close to 1 indicate strong trend.
    pub fn trend_strength(&self) -> f64 {
        strength(&self.trend, &self.residual)
    }
}

/// `1 - var(R) / var(C + R)` over the positions where both are defined.
fn strength(component: &[f64], residual: &[f64]) -> f64 {
    let (remainder, combined): (Vec<f64>, Vec<f64>) = component
        .iter()
        .zip(residual.iter())
        .filter(|(c, r)| c.is_finite() && r.is_finite())
        .map(|(c, r)| (*r, c + r))
        .unzip();

    let var_combined = variance(&combined);
    if !var_combined.is_finite() || var_combined < 1e-10 {
        return 0.0;
    }
    (1.0 - variance(&remainder) / var_combined).max(0.0)
}

/// Classical decomposition with a fixed seasonal period.
#[derive(Debug, Clone)]
pub struct ClassicalDecomposition {
    period: usize,
}

impl ClassicalDecomposition {
    /// Create a decomposer with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Monthly data with a yearly cycle.
    pub fn monthly() -> Self {
        Self::new(12)
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Minimum series length: two complete cycles.
    pub fn min_length(&self) -> usize {
        2 * self.period
    }

    /// Decompose the series additively.
    pub fn decompose(&self, series: &[f64]) -> Result<Decomposition> {
        let period = self.period;
        if period < 2 {
            return Err(AnalysisError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {period}"
            )));
        }
        let n = series.len();
        if n < self.min_length() {
            return Err(AnalysisError::InsufficientData {
                needed: self.min_length(),
                got: n,
            });
        }

        let trend = self.centered_moving_average(series);

        let detrended: Vec<f64> = series
            .iter()
            .zip(trend.iter())
            .map(|(&y, &t)| if t.is_nan() { f64::NAN } else { y - t })
            .collect();

        // Mean detrended value for each phase of the cycle
        let mut phase_means = vec![0.0; period];
        for (phase, slot) in phase_means.iter_mut().enumerate() {
            let (sum, count) = detrended
                .iter()
                .skip(phase)
                .step_by(period)
                .filter(|v| v.is_finite())
                .fold((0.0, 0usize), |(s, c), &v| (s + v, c + 1));
            *slot = if count > 0 { sum / count as f64 } else { 0.0 };
        }

        // Center so that one full cycle sums to zero
        let offset = phase_means.iter().sum::<f64>() / period as f64;
        for v in &mut phase_means {
            *v -= offset;
        }

        let seasonal: Vec<f64> = (0..n).map(|i| phase_means[i % period]).collect();

        let residual: Vec<f64> = series
            .iter()
            .zip(trend.iter())
            .zip(seasonal.iter())
            .map(|((&y, &t), &s)| y - t - s)
            .collect();

        Ok(Decomposition {
            trend,
            seasonal,
            residual,
            period,
        })
    }

    /// Centered moving average over one period.
    ///
    /// Even periods use a 2×period average: the two outermost points get
    /// half weight, so a 12-month cycle spans 13 points.
    fn centered_moving_average(&self, series: &[f64]) -> Vec<f64> {
        let period = self.period;
        let half = period / 2;
        let n = series.len();
        let mut trend = vec![f64::NAN; n];

        for i in half..(n - half) {
            let sum = if period % 2 == 0 {
                let mut s = 0.5 * series[i - half] + 0.5 * series[i + half];
                for &val in &series[(i - half + 1)..(i + half)] {
                    s += val;
                }
                s
            } else {
                series[(i - half)..=(i + half)].iter().sum::<f64>()
            };
            trend[i] = sum / period as f64;
        }

        trend
    }
}
