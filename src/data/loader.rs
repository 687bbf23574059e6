//! CSV loading of vehicle registration dates.

use super::dates::parse_timestamp;
use crate::error::{AnalysisError, Result};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Parsed registration dates from one input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationDates {
    /// Successfully parsed timestamps, in file order.
    pub dates: Vec<NaiveDateTime>,
    /// Rows whose date was missing or unparseable.
    pub dropped: usize,
}

impl RegistrationDates {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Load the registration dates in `column` from the CSV at `path`.
///
/// Returns `Ok(None)` when the header has no such column.
pub fn load_registration_dates(path: &Path, column: &str) -> Result<Option<RegistrationDates>> {
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let loaded = read_registration_dates(BufReader::new(file), column)?;
    if let Some(dates) = &loaded {
        debug!(
            path = %path.display(),
            parsed = dates.len(),
            dropped = dates.dropped,
            "loaded registration dates"
        );
    }
    Ok(loaded)
}

/// Read registration dates from any CSV source with a header row.
pub fn read_registration_dates<R: Read>(
    source: R,
    column: &str,
) -> Result<Option<RegistrationDates>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);

    let headers = reader.headers()?;
    let Some(col_idx) = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
    else {
        return Ok(None);
    };

    let mut loaded = RegistrationDates::default();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        match record.get(col_idx).and_then(parse_timestamp) {
            Some(date) => loaded.dates.push(date),
            None => loaded.dropped += 1,
        }
    }

    Ok(Some(loaded))
}
