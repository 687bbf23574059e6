//! Detection utilities for monthly series.
//!
//! This module provides tools for detecting:
//! - Percentile-band outliers, with winsorization
//! - Local peaks and troughs with a minimum separation

mod extrema;
mod outlier;

pub use extrema::{find_peaks, find_troughs, Extrema, DEFAULT_MIN_DISTANCE};
pub use outlier::{largest_residuals, OutlierBand};
