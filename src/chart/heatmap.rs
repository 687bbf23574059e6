//! Cell grid with a logarithmic color scale.

use super::palette::{gradient, log_norm, MAGMA};
use super::{DrawResult, Heatmap};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1400, 760);
const FOOTNOTE_HEIGHT: u32 = 40;

pub(super) fn draw(path: &Path, chart: &Heatmap, text: bool) -> DrawResult {
    let cols = chart.column_labels.len();
    let rows = chart.row_labels.len();

    let finite = || chart.cells.iter().flatten().copied().filter(|v| v.is_finite());
    let vmin = finite().fold(f64::INFINITY, f64::min).max(1.0);
    let vmax = finite().fold(f64::NEG_INFINITY, f64::max);

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (plot_area, footer) = root.split_vertically((SIZE.1 - FOOTNOTE_HEIGHT) as i32);

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(20);
    if text {
        builder
            .caption(&chart.title, ("sans-serif", 26))
            .x_label_area_size(50)
            .y_label_area_size(60);
    }
    // Integer positions are cell centers.
    let mut ctx = builder.build_cartesian_2d(
        -0.5..(cols.max(1) as f64 - 0.5),
        -0.5..(rows.max(1) as f64 - 0.5),
    )?;

    if text {
        let column_label = |x: &f64| label_at(&chart.column_labels, *x, false);
        let row_label = |y: &f64| label_at(&chart.row_labels, *y, true);
        ctx.configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(chart.x_desc.as_str())
            .y_desc(chart.y_desc.as_str())
            .x_labels(cols.clamp(1, 40))
            .y_labels(rows.max(1))
            .x_label_formatter(&column_label)
            .y_label_formatter(&row_label)
            .draw()?;
    }

    ctx.draw_series(chart.cells.iter().enumerate().flat_map(|(row, cells)| {
        // Row 0 is drawn at the top.
        let y = (chart.cells.len() - 1 - row) as f64;
        cells.iter().enumerate().map(move |(col, &value)| {
            let color = gradient(&MAGMA, log_norm(value, vmin, vmax));
            let x = col as f64;
            Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], color.filled())
        })
    }))?;

    if text {
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

/// Label for the cell centered at `pos`; `reversed` counts from the top.
fn label_at(labels: &[String], pos: f64, reversed: bool) -> String {
    let idx = pos.round();
    if (pos - idx).abs() > 1e-6 || idx < 0.0 || idx as usize >= labels.len() {
        return String::new();
    }
    let idx = idx as usize;
    let idx = if reversed { labels.len() - 1 - idx } else { idx };
    labels[idx].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_only_at_cell_centers() {
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(label_at(&labels, 0.0, false), "a");
        assert_eq!(label_at(&labels, 2.0, false), "c");
        assert_eq!(label_at(&labels, 0.0, true), "c");
        assert_eq!(label_at(&labels, 0.5, false), "");
        assert_eq!(label_at(&labels, 3.0, false), "");
        assert_eq!(label_at(&labels, -1.0, false), "");
    }
}
