//! Vertical bar chart over named categories.

use super::palette::{gradient, COOLWARM};
use super::{BarChart, DrawResult};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1000, 500);
const BAR_HALF_WIDTH: f64 = 0.4;

pub(super) fn draw(path: &Path, chart: &BarChart, text: bool) -> DrawResult {
    let n = chart.categories.len().max(1);
    let top = chart
        .values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    let top = if top > 0.0 { top * 1.1 } else { 1.0 };

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if text {
        builder
            .caption(&chart.title, ("sans-serif", 24))
            .x_label_area_size(40)
            .y_label_area_size(70);
    }
    let mut ctx = builder.build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..top)?;

    if text {
        let category = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            chart
                .categories
                .get(idx as usize)
                .cloned()
                .unwrap_or_default()
        };
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_desc.as_str())
            .y_desc(chart.y_desc.as_str())
            .x_labels(n)
            .x_label_formatter(&category)
            .y_label_formatter(&|y| format!("{y:.0}"))
            .draw()?;
    }

    let last = (chart.values.len().max(2) - 1) as f64;
    ctx.draw_series(chart.values.iter().enumerate().map(|(i, &value)| {
        let x = i as f64;
        let color = gradient(&COOLWARM, x / last);
        let height = if value.is_finite() { value } else { 0.0 };
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, height)],
            color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
