//! Run configuration shared by both pipelines.

use crate::error::{AnalysisError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_INPUT: &str = "Dataset/Vehicle_Data_Cleaned.csv";
pub const DEFAULT_FALLBACK_INPUT: &str = "Dataset/Vehicle_Data.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "Advanced_Analysis/images";
pub const DEFAULT_DATE_COLUMN: &str = "regvalidfrom";
pub const DEFAULT_START_YEAR: i32 = 2000;

/// Paths and options for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Preferred input CSV.
    pub input_path: PathBuf,
    /// Used when `input_path` does not exist.
    pub fallback_input_path: PathBuf,
    /// Directory receiving charts and summaries; created if absent.
    pub output_dir: PathBuf,
    /// Column holding the registration timestamp.
    pub date_column: String,
    /// First calendar year included in the analysis.
    pub start_year: i32,
    /// TrueType font for chart text; system locations are searched if unset.
    pub font_path: Option<PathBuf>,
    /// Treat a missing date column or an all-invalid column as an error
    /// instead of skipping the pipeline.
    pub strict: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            fallback_input_path: PathBuf::from(DEFAULT_FALLBACK_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            start_year: DEFAULT_START_YEAR,
            font_path: None,
            strict: false,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_fallback_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_input_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = column.into();
        self
    }

    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = year;
        self
    }

    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Pick the input file: the primary path if it exists, else the
    /// fallback.
    pub fn resolve_input(&self) -> Result<PathBuf> {
        if self.input_path.exists() {
            return Ok(self.input_path.clone());
        }
        if self.fallback_input_path.exists() {
            warn!(
                "{} not found, using {}",
                self.input_path.display(),
                self.fallback_input_path.display()
            );
            return Ok(self.fallback_input_path.clone());
        }
        Err(AnalysisError::InputNotFound {
            primary: self.input_path.clone(),
            fallback: self.fallback_input_path.clone(),
        })
    }

    /// Create the output directory if needed and return it.
    pub fn ensure_output_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| AnalysisError::io(&self.output_dir, e))?;
        Ok(&self.output_dir)
    }

    /// Location of an output artifact.
    pub fn output_file(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_fixed_layout() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, PathBuf::from("Dataset/Vehicle_Data_Cleaned.csv"));
        assert_eq!(config.fallback_input_path, PathBuf::from("Dataset/Vehicle_Data.csv"));
        assert_eq!(config.output_dir, PathBuf::from("Advanced_Analysis/images"));
        assert_eq!(config.date_column, "regvalidfrom");
        assert_eq!(config.start_year, 2000);
        assert!(!config.strict);
    }

    #[test]
    fn resolve_prefers_primary() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("clean.csv");
        let fallback = dir.path().join("raw.csv");
        fs::write(&primary, "regvalidfrom\n").unwrap();
        fs::write(&fallback, "regvalidfrom\n").unwrap();

        let config = AnalysisConfig::new()
            .with_input(&primary)
            .with_fallback_input(&fallback);
        assert_eq!(config.resolve_input().unwrap(), primary);
    }

    #[test]
    fn resolve_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("raw.csv");
        fs::write(&fallback, "regvalidfrom\n").unwrap();

        let config = AnalysisConfig::new()
            .with_input(dir.path().join("clean.csv"))
            .with_fallback_input(&fallback);
        assert_eq!(config.resolve_input().unwrap(), fallback);
    }

    #[test]
    fn resolve_fails_when_both_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::new()
            .with_input(dir.path().join("a.csv"))
            .with_fallback_input(dir.path().join("b.csv"));
        assert!(matches!(
            config.resolve_input(),
            Err(AnalysisError::InputNotFound { .. })
        ));
    }

    #[test]
    fn ensure_output_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Advanced_Analysis").join("images");
        let config = AnalysisConfig::new().with_output_dir(&out);
        config.ensure_output_dir().unwrap();
        assert!(out.is_dir());
        assert_eq!(config.output_file("x.png"), out.join("x.png"));
    }
}
