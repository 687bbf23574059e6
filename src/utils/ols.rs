//! Ordinary Least Squares line fitting.
//!
//! Fits `y = intercept + slope * x` from the normal equations. The regressor
//! is centered first so that large positional indices do not degrade
//! conditioning.

use crate::error::{AnalysisError, Result};

/// Fitted OLS line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change in `y` per unit of `x`.
    pub slope: f64,
    /// Value of the line at `x = 0`.
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through `(x[i], y[i])`.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        let n = y.len();
        if x.len() != n {
            return Err(AnalysisError::DimensionMismatch {
                expected: n,
                got: x.len(),
            });
        }
        if n < 2 {
            return Err(AnalysisError::InsufficientData { needed: 2, got: n });
        }

        let x_mean = x.iter().sum::<f64>() / n as f64;
        let y_mean = y.iter().sum::<f64>() / n as f64;

        // With a centered regressor the normal equations decouple
        let (sxx, sxy) = x
            .iter()
            .zip(y.iter())
            .fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
                let xc = xi - x_mean;
                (sxx + xc * xc, sxy + xc * (yi - y_mean))
            });
        if sxx <= 1e-12 {
            return Err(AnalysisError::InvalidParameter(
                "OLS regression failed: regressor has zero variance".into(),
            ));
        }

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Evaluate the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
