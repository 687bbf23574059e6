//! Long-term trend of monthly registrations: outlier capping, moving
//! average, turning points, additive decomposition and a one-year linear
//! forecast.

use super::{load_dates, Outcome};
use crate::chart::{thousands, Annotation, ChartRenderer, LineChart, LineSpec, PointSpec, RGBColor};
use crate::config::AnalysisConfig;
use crate::core::{Forecast, MonthlySeries, YearMonth};
use crate::detection::{largest_residuals, Extrema, OutlierBand, DEFAULT_MIN_DISTANCE};
use crate::error::{AnalysisError, Result};
use crate::models::{Forecaster, LinearTrend};
use crate::seasonality::{ClassicalDecomposition, Decomposition};
use crate::transform::trailing_mean;
use crate::utils::{describe, LinearFit, SummaryStats, SUMMARY_PERCENTILES};
use chrono::Datelike;
use tracing::{info, warn};

pub const MOVING_AVERAGE_WINDOW: usize = 12;
pub const SEASONAL_PERIOD: usize = 12;
pub const FORECAST_WINDOW: usize = 24;
pub const FORECAST_HORIZON: usize = 12;
pub const RESIDUAL_OUTLIERS: usize = 3;

pub const ACTUAL_CHART_FILE: &str = "registrations_trend_actual_2000_onwards.png";
pub const TREND_CHART_FILE: &str = "registrations_trend_component_2000_onwards.png";
pub const SEASONAL_CHART_FILE: &str = "registrations_seasonal_component_2000_onwards.png";
pub const RESIDUAL_CHART_FILE: &str = "registrations_residual_component_2000_onwards.png";
pub const PREDICTION_CHART_FILE: &str = "registrations_prediction_next_year.png";

const WIDE: (u32, u32) = (1600, 700);
const COMPONENT: (u32, u32) = (1600, 500);

const ACTUAL: RGBColor = RGBColor(31, 119, 180);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const ORANGE: RGBColor = RGBColor(255, 127, 14);
const GREEN: RGBColor = RGBColor(44, 160, 44);
const RED: RGBColor = RGBColor(214, 39, 40);
const BLUE: RGBColor = RGBColor(0, 0, 255);

/// Monthly registration counts from January of `start_year` on.
pub fn monthly_counts<D: Datelike>(dates: &[D], start_year: i32) -> Result<MonthlySeries> {
    let bound = YearMonth::new(start_year, 1)?;
    Ok(MonthlySeries::count_by_month(dates).since(bound))
}

/// Everything the trend charts are drawn from.
#[derive(Debug, Clone)]
pub struct TrendReport {
    /// Observed monthly counts.
    pub series: MonthlySeries,
    pub summary: SummaryStats,
    /// p1/p99 thresholds of the observed counts.
    pub band: OutlierBand,
    pub outlier_flags: Vec<bool>,
    pub outlier_count: usize,
    /// Counts clamped into `band`.
    pub clamped: Vec<f64>,
    /// Trailing mean of the clamped counts.
    pub moving_average: Vec<f64>,
    /// Turning points of the clamped counts.
    pub extrema: Extrema,
    /// Decomposition of the clamped counts.
    pub decomposition: Decomposition,
    /// Positions of the largest finite residuals, in order.
    pub residual_outliers: Vec<usize>,
    /// Next months, extrapolated from the unclamped counts.
    pub forecast: Forecast,
    pub forecast_line: LinearFit,
}

impl TrendReport {
    /// Run every analysis step over a monthly series.
    pub fn analyze(series: &MonthlySeries) -> Result<Self> {
        if series.len() < FORECAST_WINDOW {
            return Err(AnalysisError::InsufficientData {
                needed: FORECAST_WINDOW,
                got: series.len(),
            });
        }
        let values = series.values();

        let summary = describe(values, &SUMMARY_PERCENTILES);
        let band = OutlierBand::p1_p99(values)?;
        let outlier_flags = band.flags(values);
        let outlier_count = outlier_flags.iter().filter(|&&f| f).count();
        let clamped = band.winsorize(values);

        let moving_average = trailing_mean(&clamped, MOVING_AVERAGE_WINDOW);
        let extrema = Extrema::detect(&clamped, DEFAULT_MIN_DISTANCE);
        let decomposition = ClassicalDecomposition::new(SEASONAL_PERIOD).decompose(&clamped)?;
        let residual_outliers = largest_residuals(&decomposition.residual, RESIDUAL_OUTLIERS);

        let mut model = LinearTrend::new(FORECAST_WINDOW);
        model.fit(series)?;
        let forecast = model.predict(FORECAST_HORIZON)?;
        let forecast_line = model.line().ok_or_else(|| {
            AnalysisError::InvalidParameter("linear trend produced no line".to_string())
        })?;

        Ok(Self {
            series: series.clone(),
            summary,
            band,
            outlier_flags,
            outlier_count,
            clamped,
            moving_average,
            extrema,
            decomposition,
            residual_outliers,
            forecast,
            forecast_line,
        })
    }

    /// Chart x coordinate of every observed month.
    fn xs(&self) -> Vec<f64> {
        self.series.months().iter().map(|m| m.fractional_year()).collect()
    }

    fn points(&self, values: &[f64]) -> Vec<(f64, f64)> {
        self.xs().into_iter().zip(values.iter().copied()).collect()
    }
}

/// Run the trend pipeline end to end.
pub fn run(config: &AnalysisConfig, renderer: &ChartRenderer) -> Result<Outcome<TrendReport>> {
    let dates = match load_dates(config, "trend")? {
        Ok(dates) => dates,
        Err(reason) => return Ok(Outcome::Skipped(reason)),
    };

    let series = monthly_counts(&dates.dates, config.start_year)?;
    info!(
        months = series.len(),
        first = ?series.first_month().map(|m| m.to_string()),
        last = ?series.last_month().map(|m| m.to_string()),
        "aggregated monthly registrations"
    );

    let report = TrendReport::analyze(&series)?;
    info!("monthly registration summary:");
    for line in report.summary.lines() {
        info!("  {line}");
    }
    if report.outlier_count > 0 {
        warn!(
            "{} outlier months detected. Outliers will be capped for clarity.",
            report.outlier_count
        );
    }
    info!(
        slope = report.forecast_line.slope,
        seasonal_strength = report.decomposition.seasonal_strength(),
        trend_strength = report.decomposition.trend_strength(),
        "fitted trend and decomposition"
    );

    config.ensure_output_dir()?;
    render(&report, config, renderer)?;
    info!(output = %config.output_dir.display(), "trend outputs written");

    Ok(Outcome::Completed(report))
}

fn render(report: &TrendReport, config: &AnalysisConfig, renderer: &ChartRenderer) -> Result<()> {
    let since = config.start_year;
    renderer.line_chart(&config.output_file(ACTUAL_CHART_FILE), &actual_chart(report, since))?;

    renderer.line_chart(&config.output_file(TREND_CHART_FILE), &trend_chart(report, since))?;
    renderer.line_chart(
        &config.output_file(SEASONAL_CHART_FILE),
        &seasonal_chart(report, since),
    )?;
    renderer.line_chart(
        &config.output_file(RESIDUAL_CHART_FILE),
        &residual_chart(report, since),
    )?;
    renderer.line_chart(
        &config.output_file(PREDICTION_CHART_FILE),
        &prediction_chart(report),
    )
}

fn trend_chart(report: &TrendReport, since: i32) -> LineChart {
    LineChart::new(format!("Trend Component ({since} onwards)"), COMPONENT)
        .y_desc("Trend")
        .line(LineSpec {
            label: "Trend".to_string(),
            points: report.points(&report.decomposition.trend),
            color: PURPLE,
            markers: false,
        })
        .footnote("Purple line: long-term direction of registrations. Vertical lines: year markers.")
}

fn seasonal_chart(report: &TrendReport, since: i32) -> LineChart {
    LineChart::new(format!("Seasonal Component ({since} onwards)"), COMPONENT)
        .y_desc("Seasonality")
        .line(LineSpec {
            label: "Seasonal".to_string(),
            points: report.points(&report.decomposition.seasonal),
            color: ORANGE,
            markers: false,
        })
        .footnote("Orange line: repeating seasonal pattern. Vertical lines: year markers.")
}

fn actual_chart(report: &TrendReport, since: i32) -> LineChart {
    let xs = report.xs();
    let at = |idx: usize| (xs[idx], report.clamped[idx]);

    let mut chart = LineChart::new(
        format!("Monthly Vehicle Registrations ({since} onwards, outliers capped)"),
        WIDE,
    )
    .y_desc("Registrations")
    .line(LineSpec {
        label: "Registrations (capped)".to_string(),
        points: report.points(&report.clamped),
        color: ACTUAL,
        markers: true,
    })
    .line(LineSpec {
        label: format!("{MOVING_AVERAGE_WINDOW}-Month Moving Average"),
        points: report.points(&report.moving_average),
        color: PURPLE,
        markers: false,
    })
    .points(PointSpec {
        label: "Peaks".to_string(),
        points: report.extrema.peaks.iter().map(|&i| at(i)).collect(),
        color: RED,
    })
    .points(PointSpec {
        label: "Troughs".to_string(),
        points: report.extrema.troughs.iter().map(|&i| at(i)).collect(),
        color: BLUE,
    });

    if let Some(idx) = report.extrema.highest_peak {
        chart = chart.annotate(Annotation {
            at: at(idx),
            text: format!("Peak: {}", thousands(report.clamped[idx])),
            color: RED,
            above: true,
        });
    }
    if let Some(idx) = report.extrema.lowest_trough {
        chart = chart.annotate(Annotation {
            at: at(idx),
            text: format!("Trough: {}", thousands(report.clamped[idx])),
            color: BLUE,
            above: false,
        });
    }
    let mut note = format!(
        "Blue line: monthly registrations (outliers capped). Purple: {MOVING_AVERAGE_WINDOW}-month \
         moving average. Red/blue dots: peaks/troughs. Vertical lines: year markers."
    );
    if report.outlier_count > 0 {
        note.push_str(&format!(
            " {} outlier months capped to [{}, {}].",
            report.outlier_count,
            thousands(report.band.lower),
            thousands(report.band.upper)
        ));
    }
    chart.footnote(note)
}

fn residual_chart(report: &TrendReport, since: i32) -> LineChart {
    let xs = report.xs();
    let residual = &report.decomposition.residual;
    let flagged: Vec<(f64, f64)> = report
        .residual_outliers
        .iter()
        .map(|&i| (xs[i], residual[i]))
        .collect();

    let mut chart = LineChart::new(format!("Residual Component ({since} onwards)"), COMPONENT)
        .y_desc("Residuals")
        .line(LineSpec {
            label: "Residual".to_string(),
            points: report.points(residual),
            color: GREEN,
            markers: false,
        })
        .points(PointSpec {
            label: "Residual outliers".to_string(),
            points: flagged.clone(),
            color: RED,
        })
        .footnote(
            "Green line: unexplained variation. Red dots: largest residuals. Vertical lines: year markers.",
        );
    for (x, value) in flagged {
        chart = chart.annotate(Annotation {
            at: (x, value),
            text: format!("Outlier: {value:.0}"),
            color: RED,
            above: value >= 0.0,
        });
    }
    chart
}

fn prediction_chart(report: &TrendReport) -> LineChart {
    let forecast_points: Vec<(f64, f64)> = report
        .forecast
        .iter()
        .map(|(month, value)| (month.fractional_year(), value))
        .collect();

    let mut chart = LineChart::new("Vehicle Registrations: Actual and Next-Year Forecast", WIDE)
        .y_desc("Registrations")
        .line(LineSpec {
            label: "Actual".to_string(),
            points: report.points(report.series.values()),
            color: ACTUAL,
            markers: false,
        })
        .line(LineSpec {
            label: "Forecast".to_string(),
            points: forecast_points.clone(),
            color: RED,
            markers: true,
        })
        .footnote(format!(
            "Actual registrations and a linear prediction for the next {FORECAST_HORIZON} months \
             (red line), fit on the last {FORECAST_WINDOW} months."
        ));

    let first = report.series.first_month().map(|m| m.fractional_year());
    let last = forecast_points.last().copied();
    if let (Some(from), Some((to, value))) = (first, last) {
        chart = chart.x_range(from, to).annotate(Annotation {
            at: (to, value),
            text: thousands(value.trunc()),
            color: RED,
            above: true,
        });
    }
    chart
}
