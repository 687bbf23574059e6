//! Trailing window functions.

/// Compute a trailing rolling mean (moving average).
///
/// Position `i` averages `series[i + 1 - window ..= i]`, truncated at the
/// series start. Positions with fewer than `min_periods` observations in
/// their window are NaN, so `min_periods = 1` gives a window that shrinks
/// near the start and `min_periods = window` gives a strict one.
///
/// # Arguments
/// * `series` - Input series
/// * `window` - Window size
/// * `min_periods` - Minimum observations required for a value
pub fn rolling_mean(series: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    if series.is_empty() || window == 0 {
        return vec![f64::NAN; series.len()];
    }

    let mut result = vec![f64::NAN; series.len()];
    let mut sum = 0.0;

    for i in 0..series.len() {
        sum += series[i];
        if i >= window {
            sum -= series[i - window];
        }
        let count = (i + 1).min(window);
        if count >= min_periods.max(1) {
            result[i] = sum / count as f64;
        }
    }

    result
}

/// Moving average over `window` points that shrinks near the start.
pub fn trailing_mean(series: &[f64], window: usize) -> Vec<f64> {
    rolling_mean(series, window, 1)
}
