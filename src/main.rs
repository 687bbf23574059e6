use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use registration_trends::chart::ChartRenderer;
use registration_trends::config::{
    AnalysisConfig, DEFAULT_DATE_COLUMN, DEFAULT_FALLBACK_INPUT, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR,
    DEFAULT_START_YEAR,
};
use registration_trends::pipeline::{self, Outcome};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "registration-trends",
    version,
    about = "Seasonal and long-term trend charts for vehicle registrations",
    long_about = "Reads vehicle records from a CSV file and writes PNG charts and CSV summaries.\n\n\
                   Examples:\n  \
                     registration-trends                  Run both pipelines with default paths\n  \
                     registration-trends seasonality      Heatmap and month averages only\n  \
                     registration-trends trend --strict   Fail instead of skipping on bad input"
)]
struct Cli {
    /// Which pipeline to run
    #[arg(value_enum, default_value_t = Which::All)]
    pipeline: Which,

    /// Preferred input CSV
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Input CSV used when the preferred one does not exist
    #[arg(long, default_value = DEFAULT_FALLBACK_INPUT)]
    fallback_input: PathBuf,

    /// Directory for charts and summaries (created if absent)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Column holding the registration date
    #[arg(long, default_value = DEFAULT_DATE_COLUMN)]
    date_column: String,

    /// First calendar year included
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start_year: i32,

    /// TrueType font for chart text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Treat a missing or unparseable date column as an error
    #[arg(long)]
    strict: bool,

    /// Log level (error, warn, info, debug, trace) or an EnvFilter directive
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Which {
    Seasonality,
    Trend,
    All,
}

fn setup_logging(log_level: &str) {
    let normalised = match log_level.to_uppercase().as_str() {
        "WARNING" => "warn".to_string(),
        _ => log_level.to_lowercase(),
    };
    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn report<T>(name: &str, outcome: &Outcome<T>) {
    match outcome {
        Outcome::Completed(_) => tracing::info!("{name} analysis complete"),
        Outcome::Skipped(reason) => tracing::warn!("{name} analysis skipped: {reason}"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let mut config = AnalysisConfig::new()
        .with_input(cli.input)
        .with_fallback_input(cli.fallback_input)
        .with_output_dir(cli.output_dir)
        .with_date_column(cli.date_column)
        .with_start_year(cli.start_year)
        .strict(cli.strict);
    if let Some(font) = cli.font {
        config = config.with_font(font);
    }

    let output = config
        .ensure_output_dir()
        .context("failed to prepare output directory")?;
    tracing::info!("writing outputs to {}", output.display());

    let renderer = ChartRenderer::new(config.font_path.as_deref());

    if matches!(cli.pipeline, Which::Seasonality | Which::All) {
        let outcome =
            pipeline::seasonality::run(&config, &renderer).context("seasonality analysis failed")?;
        report("seasonality", &outcome);
    }
    if matches!(cli.pipeline, Which::Trend | Which::All) {
        let outcome = pipeline::trend::run(&config, &renderer).context("trend analysis failed")?;
        report("trend", &outcome);
    }
    Ok(())
}
