//! Line charts over a continuous year axis.

use super::{padded_range, DrawResult, LineChart};
use plotters::prelude::*;
use std::path::Path;

const FOOTNOTE_HEIGHT: u32 = 40;
const YEAR_MARKER: RGBColor = RGBColor(170, 170, 170);
const ANNOTATION_OFFSET: i32 = 22;

pub(super) fn draw(path: &Path, chart: &LineChart, text: bool) -> DrawResult {
    let all_points = || {
        chart
            .lines
            .iter()
            .flat_map(|l| l.points.iter())
            .chain(chart.points.iter().flat_map(|p| p.points.iter()))
            .copied()
            .chain(chart.annotations.iter().map(|a| a.at))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    };

    let (x_lo, x_hi) = match chart.x_range {
        Some(range) => range,
        None => padded_range(all_points().map(|(x, _)| x), 0.0),
    };
    let (y_lo, y_hi) = padded_range(all_points().map(|(_, y)| y), 0.08);

    let root = BitMapBackend::new(path, chart.size).into_drawing_area();
    root.fill(&WHITE)?;
    let (plot_area, footer) =
        root.split_vertically((chart.size.1.saturating_sub(FOOTNOTE_HEIGHT)) as i32);

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(20);
    if text {
        builder
            .caption(&chart.title, ("sans-serif", 24))
            .x_label_area_size(45)
            .y_label_area_size(80);
    }
    let mut ctx = builder.build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    if text {
        let years = ((x_hi - x_lo).ceil() as usize + 1).clamp(2, 30);
        ctx.configure_mesh()
            .light_line_style(WHITE.stroke_width(1))
            .x_desc(chart.x_desc.as_str())
            .y_desc(chart.y_desc.as_str())
            .x_labels(years)
            .x_label_formatter(&year_label)
            .y_label_formatter(&|y| thousands(*y))
            .draw()?;
    }

    if chart.year_markers {
        let first = x_lo.ceil() as i32;
        let last = x_hi.floor() as i32;
        for year in first..=last {
            let x = year as f64;
            ctx.draw_series(LineSeries::new(
                vec![(x, y_lo), (x, y_hi)],
                YEAR_MARKER.stroke_width(1),
            ))?;
        }
    }

    for line in &chart.lines {
        let color = line.color;
        let points: Vec<(f64, f64)> = line
            .points
            .iter()
            .copied()
            .filter(|(_, y)| y.is_finite())
            .collect();
        let series = ctx.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
        if text && !line.label.is_empty() {
            series
                .label(line.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }
        if line.markers {
            ctx.draw_series(points.iter().map(|&point| Circle::new(point, 3, color.filled())))?;
        }
    }

    for set in &chart.points {
        let color = set.color;
        let series = ctx.draw_series(
            set.points
                .iter()
                .filter(|(_, y)| y.is_finite())
                .map(|&point| Circle::new(point, 5, color.filled())),
        )?;
        if text && !set.label.is_empty() {
            series
                .label(set.label.as_str())
                .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
        }
    }

    for note in &chart.annotations {
        if !(note.at.0.is_finite() && note.at.1.is_finite()) {
            continue;
        }
        let color = note.color;
        let dy = if note.above {
            -ANNOTATION_OFFSET
        } else {
            ANNOTATION_OFFSET - 14
        };
        let marker = EmptyElement::at(note.at) + Circle::new((0, 0), 6, color.stroke_width(2));
        if text {
            let style = ("sans-serif", 15).into_font().color(&color);
            ctx.draw_series(std::iter::once(
                marker + Text::new(note.text.clone(), (8, dy), style),
            ))?;
        } else {
            ctx.draw_series(std::iter::once(marker))?;
        }
    }

    if text {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85).filled())
            .border_style(BLACK.stroke_width(1))
            .draw()?;

        if let Some(note) = &chart.footnote {
            footer.draw(&Text::new(
                note.clone(),
                (20, 10),
                ("sans-serif", 15).into_font().color(&BLACK),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}

fn year_label(x: &f64) -> String {
    if (x - x.round()).abs() < 1e-6 {
        format!("{:.0}", x)
    } else {
        String::new()
    }
}

/// Integer with thousands separators, e.g. `12,345`.
pub(crate) fn thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}
