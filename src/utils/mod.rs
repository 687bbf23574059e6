//! Numerical utilities shared by the analysis pipelines.

pub mod ols;
pub mod stats;

pub use ols::LinearFit;
pub use stats::{describe, mean, percentile, std_dev, SummaryStats, SUMMARY_PERCENTILES};
