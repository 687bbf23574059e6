//! Color scales.

use plotters::style::RGBColor;

/// Dark purple to pale yellow, sampled from matplotlib's magma.
pub const MAGMA: [(u8, u8, u8); 6] = [
    (0, 0, 4),
    (59, 15, 112),
    (140, 41, 129),
    (222, 73, 104),
    (254, 159, 109),
    (252, 253, 191),
];

/// Blue through grey to red.
pub const COOLWARM: [(u8, u8, u8); 3] = [(59, 76, 192), (221, 221, 221), (180, 4, 38)];

/// Interpolate a color at `t` in `[0, 1]` along evenly spaced stops.
pub fn gradient(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    match stops.len() {
        0 => return RGBColor(0, 0, 0),
        1 => return RGBColor(stops[0].0, stops[0].1, stops[0].2),
        _ => {}
    }
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (stops.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - idx as f64;
    let (a, b) = (stops[idx], stops[idx + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Position of `value` on a logarithmic scale from `vmin` to `vmax`.
///
/// `vmin` is floored at 1 so that zero counts never reach `log(0)`;
/// values below the floor map to 0.
pub fn log_norm(value: f64, vmin: f64, vmax: f64) -> f64 {
    let lo = vmin.max(1.0);
    let hi = vmax.max(lo);
    if hi <= lo {
        return 0.0;
    }
    let v = value.max(lo).min(hi);
    (v.ln() - lo.ln()) / (hi.ln() - lo.ln())
}
