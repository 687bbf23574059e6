//! # registration-trends
//!
//! Seasonal and long-term trend analysis of vehicle registration records.
//!
//! Two pipelines read a CSV of registrations and render PNG charts:
//! - [`pipeline::seasonality`]: month×year heatmap and month-of-year averages
//! - [`pipeline::trend`]: capped monthly counts with moving average and
//!   turning points, an additive decomposition, and a one-year linear
//!   forecast
//!
//! The building blocks (percentiles, winsorization, peak detection,
//! classical decomposition, OLS) are usable on their own.

#![allow(clippy::needless_range_loop)]

pub mod chart;
pub mod config;
pub mod core;
pub mod data;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod seasonality;
pub mod transform;
pub mod utils;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::chart::ChartRenderer;
    pub use crate::config::AnalysisConfig;
    pub use crate::core::{Forecast, MonthlySeries, YearMonth};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::models::Forecaster;
    pub use crate::pipeline::{Outcome, SkipReason};
}
