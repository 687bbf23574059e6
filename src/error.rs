//! Error types for the registration-trends library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while loading, analysing or rendering.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// The configured date column is not present in the input header.
    #[error("column '{0}' not found in input")]
    MissingColumn(String),

    /// The date column exists but not a single value could be parsed.
    #[error("no parseable dates in column '{0}'")]
    NoValidDates(String),

    /// Neither the primary nor the fallback input file exists.
    #[error("input not found: tried {} and {}", primary.display(), fallback.display())]
    InputNotFound { primary: PathBuf, fallback: PathBuf },

    /// Filesystem error with the path that triggered it.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Chart rendering failed.
    #[error("chart error: {0}")]
    Chart(String),
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
