//! Linear trend extrapolation over a trailing window.
//!
//! The regressor is the sequential position of each point in the full
//! series, so the fitted line continues the series' own index into the
//! future: the first forecast step is position `n`, the month after the
//! last observation.

use crate::core::{Forecast, MonthlySeries, YearMonth};
use crate::error::{AnalysisError, Result};
use crate::models::Forecaster;
use crate::utils::LinearFit;

/// Default number of trailing observations used for the fit.
pub const DEFAULT_WINDOW: usize = 24;

#[derive(Debug, Clone)]
struct FittedState {
    line: LinearFit,
    series_len: usize,
    last_month: YearMonth,
    fitted: Vec<f64>,
}

/// OLS line through the last `window` points of a series.
#[derive(Debug, Clone)]
pub struct LinearTrend {
    window: usize,
    state: Option<FittedState>,
}

impl LinearTrend {
    /// Create a model fitting the trailing `window` observations.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            state: None,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// The fitted line, once `fit` has succeeded.
    pub fn line(&self) -> Option<LinearFit> {
        self.state.as_ref().map(|s| s.line)
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Forecaster for LinearTrend {
    fn fit(&mut self, series: &MonthlySeries) -> Result<()> {
        if self.window < 2 {
            return Err(AnalysisError::InvalidParameter(format!(
                "window must be at least 2, got {}",
                self.window
            )));
        }
        let n = series.len();
        if n < self.window {
            return Err(AnalysisError::InsufficientData {
                needed: self.window,
                got: n,
            });
        }
        let last_month = series.last_month().ok_or(AnalysisError::EmptyData)?;

        let start = n - self.window;
        let x: Vec<f64> = (start..n).map(|i| i as f64).collect();
        let y = &series.values()[start..];
        let line = LinearFit::fit(&x, y)?;

        self.state = Some(FittedState {
            line,
            series_len: n,
            last_month,
            fitted: x.iter().map(|&xi| line.predict(xi)).collect(),
        });
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let state = self.state.as_ref().ok_or_else(|| {
            AnalysisError::InvalidParameter("model must be fitted before prediction".to_string())
        })?;

        let months = (1..=horizon as u32)
            .map(|step| state.last_month.add_months(step))
            .collect();
        let point = (0..horizon)
            .map(|step| state.line.predict((state.series_len + step) as f64))
            .collect();
        Forecast::new(months, point)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.fitted.as_slice())
    }

    fn name(&self) -> &str {
        "LinearTrend"
    }
}

/// Fit a [`LinearTrend`] on the last `window` points and forecast `horizon`
/// months past the end of `series`.
pub fn linear_forecast(series: &MonthlySeries, window: usize, horizon: usize) -> Result<Forecast> {
    let mut model = LinearTrend::new(window);
    model.fit(series)?;
    model.predict(horizon)
}
