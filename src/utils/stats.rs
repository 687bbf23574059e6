//! Statistical utility functions.

/// Percentiles reported by the monthly summary.
pub const SUMMARY_PERCENTILES: [f64; 7] = [0.01, 0.05, 0.25, 0.50, 0.75, 0.95, 0.99];

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the variance of a slice (sample variance with n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Calculate the standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Percentile of already sorted values, `q` in `[0, 1]`.
///
/// Interpolates linearly between the two closest ranks.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile of unsorted values, `q` in `[0, 1]`. NaN values are ignored.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    percentile_sorted(&sorted_finite(values), q)
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Descriptive summary of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    /// `(q, value)` pairs in the order requested.
    pub percentiles: Vec<(f64, f64)>,
    pub max: f64,
}

impl SummaryStats {
    /// Value for percentile `q` if it was requested.
    pub fn percentile(&self, q: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(p, _)| (p - q).abs() < 1e-12)
            .map(|(_, v)| *v)
    }

    /// Human readable lines, one statistic per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("count {:>14}", self.count),
            format!("mean  {:>14.2}", self.mean),
            format!("std   {:>14.2}", self.std),
            format!("min   {:>14.2}", self.min),
        ];
        for (q, v) in &self.percentiles {
            let label = format!("{}%", (q * 100.0).round());
            lines.push(format!("{label:<6}{v:>14.2}"));
        }
        lines.push(format!("max   {:>14.2}", self.max));
        lines
    }
}

/// Summarize `values` with the given percentiles (each in `[0, 1]`).
pub fn describe(values: &[f64], percentiles: &[f64]) -> SummaryStats {
    let sorted = sorted_finite(values);
    SummaryStats {
        count: sorted.len(),
        mean: mean(&sorted),
        std: std_dev(&sorted),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        percentiles: percentiles
            .iter()
            .map(|&q| (q, percentile_sorted(&sorted, q)))
            .collect(),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}
