//! Forecasting models.

mod linear_trend;
mod traits;

pub use linear_trend::{linear_forecast, LinearTrend, DEFAULT_WINDOW};
pub use traits::Forecaster;
