//! Case records and their ingestion from tabular exports

mod data;
pub mod locale;
pub mod loader;

pub use data::{CaseRecord, ParsedAmount, Recipient};
pub use loader::{load_cases, load_cases_from_reader, LoadError};
pub use locale::{parse_amount, parse_date};
