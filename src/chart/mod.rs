//! PNG chart rendering on the plotters bitmap backend.
//!
//! Each chart opens its own drawing area, draws, presents and drops it
//! before the next chart starts. When no font could be registered the
//! charts are still produced, minus captions, axis labels, legends and
//! annotation text.

mod bar;
mod font;
mod heatmap;
mod line;
pub mod palette;

use crate::error::{AnalysisError, Result};
use std::path::Path;
use tracing::debug;

pub(crate) use line::thousands;
pub use plotters::style::RGBColor;

pub(crate) type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Grid of values drawn as colored cells, rows listed top to bottom.
#[derive(Debug, Clone)]
pub struct Heatmap {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub column_labels: Vec<String>,
    pub row_labels: Vec<String>,
    /// `cells[row][column]`.
    pub cells: Vec<Vec<f64>>,
    pub footnote: Option<String>,
}

/// One bar per category.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

/// A connected line, optionally with a marker at every point.
#[derive(Debug, Clone)]
pub struct LineSpec {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub markers: bool,
}

/// Unconnected highlighted points.
#[derive(Debug, Clone)]
pub struct PointSpec {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
}

/// A labelled marker placed above (`above = true`) or below its point.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub at: (f64, f64),
    pub text: String,
    pub color: RGBColor,
    pub above: bool,
}

/// Line chart over a continuous year axis.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub size: (u32, u32),
    pub lines: Vec<LineSpec>,
    pub points: Vec<PointSpec>,
    pub annotations: Vec<Annotation>,
    /// Dotted vertical line at every January.
    pub year_markers: bool,
    /// Explicit x extent; derived from the data when `None`.
    pub x_range: Option<(f64, f64)>,
    pub footnote: Option<String>,
}

impl LineChart {
    pub fn new(title: impl Into<String>, size: (u32, u32)) -> Self {
        Self {
            title: title.into(),
            x_desc: "Month (Year)".to_string(),
            y_desc: String::new(),
            size,
            lines: Vec::new(),
            points: Vec::new(),
            annotations: Vec::new(),
            year_markers: true,
            x_range: None,
            footnote: None,
        }
    }

    pub fn y_desc(mut self, desc: impl Into<String>) -> Self {
        self.y_desc = desc.into();
        self
    }

    pub fn line(mut self, line: LineSpec) -> Self {
        self.lines.push(line);
        self
    }

    pub fn points(mut self, points: PointSpec) -> Self {
        self.points.push(points);
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn x_range(mut self, from: f64, to: f64) -> Self {
        self.x_range = Some((from, to));
        self
    }

    pub fn footnote(mut self, text: impl Into<String>) -> Self {
        self.footnote = Some(text.into());
        self
    }
}

/// Renders charts to PNG files.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    text: bool,
}

impl ChartRenderer {
    /// Create a renderer, registering a font from `font_path` or a system
    /// location.
    pub fn new(font_path: Option<&Path>) -> Self {
        Self {
            text: font::ensure_font(font_path),
        }
    }

    /// A renderer that never draws text.
    pub fn without_text() -> Self {
        Self { text: false }
    }

    /// Whether captions, labels and legends are drawn.
    pub fn draws_text(&self) -> bool {
        self.text
    }

    pub fn heatmap(&self, path: &Path, chart: &Heatmap) -> Result<()> {
        finish(path, heatmap::draw(path, chart, self.text))
    }

    pub fn bar_chart(&self, path: &Path, chart: &BarChart) -> Result<()> {
        finish(path, bar::draw(path, chart, self.text))
    }

    pub fn line_chart(&self, path: &Path, chart: &LineChart) -> Result<()> {
        finish(path, line::draw(path, chart, self.text))
    }
}

fn finish(path: &Path, result: DrawResult) -> Result<()> {
    result.map_err(|e| AnalysisError::Chart(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), "wrote chart");
    Ok(())
}

/// Finite `(min, max)` of `values`, padded so the range is never empty.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>, pad_fraction: f64) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * pad_fraction
    } else {
        lo.abs().max(1.0) * 0.1
    };
    (lo - pad, hi + pad)
}
