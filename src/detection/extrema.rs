//! Local peak and trough detection with a minimum separation.
//!
//! A single left-to-right scan keeps a cursor on the last accepted peak.
//! A local maximum is accepted only when it lies at least `min_distance`
//! positions after that cursor.

/// Default separation between accepted extrema, in months.
pub const DEFAULT_MIN_DISTANCE: usize = 6;

/// Indices of local maxima at least `min_distance` apart.
///
/// A local maximum is strictly greater than its left neighbour and greater
/// than the first differing value to its right. Flat tops resolve to the
/// middle of the plateau (left middle for even widths). The first and last
/// points never qualify.
pub fn find_peaks(series: &[f64], min_distance: usize) -> Vec<usize> {
    let n = series.len();
    let mut peaks = Vec::new();
    let mut last_accepted: Option<usize> = None;

    let mut i = 1;
    while i + 1 < n {
        if series[i] > series[i - 1] {
            let mut ahead = i + 1;
            while ahead < n && series[ahead] == series[i] {
                ahead += 1;
            }
            if ahead < n && series[ahead] < series[i] {
                let peak = i + (ahead - 1 - i) / 2;
                let far_enough = last_accepted.map_or(true, |prev| peak - prev >= min_distance);
                if far_enough {
                    peaks.push(peak);
                    last_accepted = Some(peak);
                }
            }
            i = ahead;
        } else {
            i += 1;
        }
    }

    peaks
}

/// Indices of local minima at least `min_distance` apart: the peaks of the
/// negated series.
pub fn find_troughs(series: &[f64], min_distance: usize) -> Vec<usize> {
    let negated: Vec<f64> = series.iter().map(|x| -x).collect();
    find_peaks(&negated, min_distance)
}

/// Accepted peaks and troughs of a series, plus the extreme ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extrema {
    pub peaks: Vec<usize>,
    pub troughs: Vec<usize>,
    /// Index of the highest accepted peak.
    pub highest_peak: Option<usize>,
    /// Index of the lowest accepted trough.
    pub lowest_trough: Option<usize>,
}

impl Extrema {
    pub fn detect(series: &[f64], min_distance: usize) -> Self {
        let peaks = find_peaks(series, min_distance);
        let troughs = find_troughs(series, min_distance);
        let highest_peak = first_extreme(&peaks, |idx, best| series[idx] > series[best]);
        let lowest_trough = first_extreme(&troughs, |idx, best| series[idx] < series[best]);
        Self {
            peaks,
            troughs,
            highest_peak,
            lowest_trough,
        }
    }
}

/// First index that no later index beats.
fn first_extreme(indices: &[usize], beats: impl Fn(usize, usize) -> bool) -> Option<usize> {
    let mut best = *indices.first()?;
    for &idx in &indices[1..] {
        if beats(idx, best) {
            best = idx;
        }
    }
    Some(best)
}
