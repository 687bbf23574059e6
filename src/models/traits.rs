//! Forecaster trait defining the common interface for models.

use crate::core::{Forecast, MonthlySeries};
use crate::error::Result;

/// Common interface for monthly forecasting models.
pub trait Forecaster {
    /// Fit the model to the monthly series.
    fn fit(&mut self, series: &MonthlySeries) -> Result<()>;

    /// Generate predictions for the months following the fitted series.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}
