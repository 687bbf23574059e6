//! Month-of-year seasonality: a month×year pivot of registrations, its
//! heatmap, and month averages across years.

use super::{load_dates, Outcome};
use crate::chart::{BarChart, ChartRenderer, Heatmap};
use crate::config::AnalysisConfig;
use crate::core::{MonthlySeries, MONTH_ABBREVIATIONS};
use crate::error::{AnalysisError, Result};
use chrono::Datelike;
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub const HEATMAP_FILE: &str = "monthly_registration_heatmap.png";
pub const AVERAGE_CHART_FILE: &str = "average_registrations_by_month.png";
pub const MONTHLY_CSV_FILE: &str = "monthly_registration_trend.csv";
pub const AVERAGE_CSV_FILE: &str = "average_registrations_by_month.csv";

/// Registrations per (month, year), zero filled, rows Jan..Dec.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthYearPivot {
    years: Vec<i32>,
    /// `rows[month_index][year_index]`.
    rows: Vec<Vec<f64>>,
}

impl MonthYearPivot {
    /// Pivot a monthly series: one column per year present.
    pub fn from_series(series: &MonthlySeries) -> Self {
        let mut years: Vec<i32> = series.months().iter().map(|m| m.year()).collect();
        years.dedup();

        let mut rows = vec![vec![0.0; years.len()]; 12];
        for (month, count) in series.iter() {
            if let Ok(col) = years.binary_search(&month.year()) {
                rows[month.month_index()][col] = count;
            }
        }
        Self { years, rows }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Row labels, always the twelve month abbreviations in calendar order.
    pub fn row_labels(&self) -> [&'static str; 12] {
        MONTH_ABBREVIATIONS
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Count for a month (1-based) and year; zero when not observed.
    pub fn get(&self, month: u32, year: i32) -> f64 {
        let Ok(col) = self.years.binary_search(&year) else {
            return 0.0;
        };
        self.rows
            .get(month.wrapping_sub(1) as usize)
            .map_or(0.0, |row| row[col])
    }

    /// Total per month across all years.
    pub fn month_totals(&self) -> [f64; 12] {
        let mut totals = [0.0; 12];
        for (total, row) in totals.iter_mut().zip(&self.rows) {
            *total = row.iter().sum();
        }
        totals
    }

    /// Mean per month across all year columns (zero-filled cells count).
    pub fn month_averages(&self) -> [f64; 12] {
        let mut averages = self.month_totals();
        let n = self.years.len();
        for avg in &mut averages {
            *avg = if n == 0 { 0.0 } else { *avg / n as f64 };
        }
        averages
    }

    pub fn min_cell(&self) -> f64 {
        self.rows.iter().flatten().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_cell(&self) -> f64 {
        self.rows.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Aggregates behind the seasonality outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalityReport {
    /// Observed (year, month) counts from `start_year` on.
    pub monthly: MonthlySeries,
    pub pivot: MonthYearPivot,
    pub averages: [f64; 12],
    pub totals: [f64; 12],
}

impl SeasonalityReport {
    /// Aggregate registration dates falling in `start_year` or later.
    pub fn from_dates<D: Datelike + Clone>(dates: &[D], start_year: i32) -> Self {
        let recent: Vec<D> = dates
            .iter()
            .filter(|d| d.year() >= start_year)
            .cloned()
            .collect();
        Self::from_series(MonthlySeries::count_by_month(&recent))
    }

    fn from_series(monthly: MonthlySeries) -> Self {
        let pivot = MonthYearPivot::from_series(&monthly);
        Self {
            averages: pivot.month_averages(),
            totals: pivot.month_totals(),
            monthly,
            pivot,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty()
    }
}

#[derive(Serialize)]
struct MonthlyRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "MonthName")]
    month_name: &'static str,
    #[serde(rename = "Registrations")]
    registrations: u64,
}

#[derive(Serialize)]
struct AverageRow {
    #[serde(rename = "MonthName")]
    month_name: &'static str,
    #[serde(rename = "AverageRegistrations")]
    average: f64,
    #[serde(rename = "TotalRegistrations")]
    total: u64,
}

/// Run the seasonality pipeline end to end.
pub fn run(config: &AnalysisConfig, renderer: &ChartRenderer) -> Result<Outcome<SeasonalityReport>> {
    let dates = match load_dates(config, "seasonality")? {
        Ok(dates) => dates,
        Err(reason) => return Ok(Outcome::Skipped(reason)),
    };

    let report = SeasonalityReport::from_dates(&dates.dates, config.start_year);
    if report.is_empty() {
        return Err(AnalysisError::InsufficientData { needed: 1, got: 0 });
    }
    info!(
        months = report.monthly.len(),
        years = report.pivot.years().len(),
        "aggregated registrations by month"
    );

    config.ensure_output_dir()?;
    render(&report, config, renderer)?;
    write_monthly_csv(&report, &config.output_file(MONTHLY_CSV_FILE))?;
    write_average_csv(&report, &config.output_file(AVERAGE_CSV_FILE))?;
    info!(output = %config.output_dir.display(), "seasonality outputs written");

    Ok(Outcome::Completed(report))
}

fn render(report: &SeasonalityReport, config: &AnalysisConfig, renderer: &ChartRenderer) -> Result<()> {
    let pivot = &report.pivot;
    let heatmap = Heatmap {
        title: format!("Monthly Registration Heatmap by Year ({} onwards)", config.start_year),
        x_desc: "Year".to_string(),
        y_desc: "Month".to_string(),
        column_labels: pivot.years().iter().map(|y| y.to_string()).collect(),
        row_labels: pivot.row_labels().iter().map(|m| m.to_string()).collect(),
        cells: pivot.rows().to_vec(),
        footnote: Some(
            "Light color = high registrations, dark color = low registrations (log scale)"
                .to_string(),
        ),
    };
    renderer.heatmap(&config.output_file(HEATMAP_FILE), &heatmap)?;

    let bars = BarChart {
        title: format!("Average Registrations by Month (Seasonality, {}+)", config.start_year),
        x_desc: "Month".to_string(),
        y_desc: "Average Registrations".to_string(),
        categories: MONTH_ABBREVIATIONS.iter().map(|m| m.to_string()).collect(),
        values: report.averages.to_vec(),
    };
    renderer.bar_chart(&config.output_file(AVERAGE_CHART_FILE), &bars)
}

/// Write observed (year, month) counts in chronological order.
pub fn write_monthly_csv(report: &SeasonalityReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (month, count) in report.monthly.iter() {
        writer.serialize(MonthlyRow {
            year: month.year(),
            month_name: month.abbreviation(),
            registrations: count as u64,
        })?;
    }
    writer.flush().map_err(|e| AnalysisError::io(path, e))
}

/// Write the twelve month averages and totals, Jan..Dec.
pub fn write_average_csv(report: &SeasonalityReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (idx, name) in MONTH_ABBREVIATIONS.iter().enumerate() {
        writer.serialize(AverageRow {
            month_name: name,
            average: report.averages[idx],
            total: report.totals[idx] as u64,
        })?;
    }
    writer.flush().map_err(|e| AnalysisError::io(path, e))
}
