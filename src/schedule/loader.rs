//! Load a fee schedule from a `Name,Value` CSV file
//!
//! Names that are not present keep their built-in default.

use super::FeeSchedule;
use csv::Reader;
use log::debug;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Conventional file name of a schedule override
pub const DEFAULT_SCHEDULE_FILE: &str = "data/fee_schedule.csv";

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown schedule entry: {0}")]
    UnknownEntry(String),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// Raw CSV row of a schedule file
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: String,
}

/// Load a schedule from a file path
pub fn load_schedule(path: &Path) -> Result<FeeSchedule, ScheduleError> {
    let file = File::open(path)?;
    load_schedule_from_reader(file)
}

/// Load a schedule from any reader
pub fn load_schedule_from_reader<R: std::io::Read>(reader: R) -> Result<FeeSchedule, ScheduleError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut schedule = FeeSchedule::default_schedule();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let name = row.name.trim();
        let value: f64 = row.value.trim().parse().map_err(|_| ScheduleError::InvalidValue {
            name: name.to_string(),
            value: row.value.clone(),
        })?;

        let slot = schedule
            .entry_mut(name)
            .ok_or_else(|| ScheduleError::UnknownEntry(name.to_string()))?;
        *slot = value;
        debug!("schedule override {} = {}", name, value);
    }

    Ok(schedule)
}
