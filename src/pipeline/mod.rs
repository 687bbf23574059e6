//! The two analysis pipelines and their shared input step.
//!
//! Both pipelines read the same input independently: resolve the CSV,
//! parse the date column, then aggregate. A missing date column or a
//! column without a single parseable date skips the pipeline unless the
//! configuration is strict.

pub mod seasonality;
pub mod trend;

use crate::config::AnalysisConfig;
use crate::data::{load_registration_dates, RegistrationDates};
use crate::error::{AnalysisError, Result};
use std::fmt;
use tracing::{info, warn};

/// Why a pipeline produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The date column is not in the input header.
    MissingColumn(String),
    /// The date column exists but no value parsed as a date.
    NoValidDates(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn(col) => write!(f, "column '{col}' not found"),
            Self::NoValidDates(col) => write!(f, "no parseable dates in column '{col}'"),
        }
    }
}

impl From<SkipReason> for AnalysisError {
    fn from(reason: SkipReason) -> Self {
        match reason {
            SkipReason::MissingColumn(col) => AnalysisError::MissingColumn(col),
            SkipReason::NoValidDates(col) => AnalysisError::NoValidDates(col),
        }
    }
}

/// Result of running a pipeline.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// Outputs were written; the computed report is returned.
    Completed(T),
    /// Nothing was written.
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// The report, if the pipeline completed.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Skipped(_) => None,
        }
    }
}

/// Load the configured date column, or the reason to skip.
pub(crate) fn load_dates(
    config: &AnalysisConfig,
    pipeline: &str,
) -> Result<std::result::Result<RegistrationDates, SkipReason>> {
    let input = config.resolve_input()?;
    info!(pipeline, input = %input.display(), "loading vehicle records");

    let reason = match load_registration_dates(&input, &config.date_column)? {
        Some(dates) if !dates.is_empty() => {
            if dates.dropped > 0 {
                info!(pipeline, dropped = dates.dropped, "dropped rows without a valid date");
            }
            return Ok(Ok(dates));
        }
        Some(_) => SkipReason::NoValidDates(config.date_column.clone()),
        None => SkipReason::MissingColumn(config.date_column.clone()),
    };

    if config.strict {
        return Err(reason.into());
    }
    warn!(pipeline, "skipping: {reason}");
    Ok(Err(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(csv: &str) -> (tempfile::TempDir, AnalysisConfig) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vehicles.csv");
        fs::write(&input, csv).unwrap();
        let config = AnalysisConfig::new()
            .with_input(&input)
            .with_fallback_input(dir.path().join("missing.csv"))
            .with_output_dir(dir.path().join("out"));
        (dir, config)
    }

    #[test]
    fn missing_column_skips() {
        let (_dir, config) = config_for("id,make\n1,Ford\n");
        let loaded = load_dates(&config, "test").unwrap();
        assert_eq!(
            loaded.unwrap_err(),
            SkipReason::MissingColumn("regvalidfrom".to_string())
        );
    }

    #[test]
    fn all_invalid_dates_skip() {
        let (_dir, config) = config_for("regvalidfrom\nnope\n\n");
        let loaded = load_dates(&config, "test").unwrap();
        assert_eq!(
            loaded.unwrap_err(),
            SkipReason::NoValidDates("regvalidfrom".to_string())
        );
    }

    #[test]
    fn strict_turns_skip_into_error() {
        let (_dir, config) = config_for("id\n1\n");
        let config = config.strict(true);
        assert!(matches!(
            load_dates(&config, "test"),
            Err(AnalysisError::MissingColumn(_))
        ));
    }

    #[test]
    fn valid_dates_load() {
        let (_dir, config) = config_for("regvalidfrom\n2001-01-01\nbad\n");
        let dates = load_dates(&config, "test").unwrap().unwrap();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates.dropped, 1);
    }

    #[test]
    fn outcome_accessors() {
        let done: Outcome<u8> = Outcome::Completed(3);
        assert!(!done.is_skipped());
        assert_eq!(done.completed(), Some(3));
        let skipped: Outcome<u8> = Outcome::Skipped(SkipReason::MissingColumn("c".into()));
        assert!(skipped.is_skipped());
        assert_eq!(skipped.completed(), None);
    }
}
