//! Load case records from a semicolon-separated export
//!
//! Expected headers: `Index;Streitwert;Aktenzeichen;Name;Strasse;PLZ;Ort;Datum`.
//! The `Datum` column may be omitted.

use super::locale::{parse_amount, parse_date};
use super::{CaseRecord, Recipient};
use csv::ReaderBuilder;
use log::warn;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid {field} {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

/// Raw CSV row matching the case export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Index")]
    index: String,
    #[serde(rename = "Streitwert")]
    dispute_value: String,
    #[serde(rename = "Aktenzeichen")]
    case_reference: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Strasse")]
    street: String,
    #[serde(rename = "PLZ")]
    postal_code: String,
    #[serde(rename = "Ort")]
    city: String,
    #[serde(rename = "Datum", default)]
    date: Option<String>,
}

impl CsvRow {
    fn to_record(self, row: usize) -> Result<CaseRecord, LoadError> {
        let running_index = self.index.trim().parse().map_err(|_| LoadError::InvalidField {
            row,
            field: "Index",
            value: self.index.clone(),
        })?;

        let dispute_value = parse_amount(&self.dispute_value);
        if !dispute_value.is_valid() {
            warn!(
                "row {}: dispute value {:?} is not a number, using 0,00",
                row, self.dispute_value
            );
        }

        let invoice_date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_date(text).ok_or_else(|| LoadError::InvalidField {
                row,
                field: "Datum",
                value: text.to_string(),
            })?),
        };

        Ok(CaseRecord {
            running_index,
            dispute_value,
            case_reference: self.case_reference.trim().to_string(),
            recipient: Recipient {
                name: self.name.trim().to_string(),
                street: self.street.trim().to_string(),
                postal_code: self.postal_code.trim().to_string(),
                city: self.city.trim().to_string(),
            },
            invoice_date,
        })
    }
}

/// Load all cases from a CSV file
pub fn load_cases<P: AsRef<Path>>(path: P) -> Result<Vec<CaseRecord>, LoadError> {
    let file = File::open(path)?;
    load_cases_from_reader(file)
}

/// Load cases from any reader (e.g., string buffer)
pub fn load_cases_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<CaseRecord>, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);
    let mut cases = Vec::new();

    // Row numbers are 1-based data rows, the header is row 0
    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        cases.push(row.to_record(i + 1)?);
    }

    Ok(cases)
}
