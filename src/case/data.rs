//! Case record structures delivered to the calculator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of parsing a monetary text field
///
/// Unparseable input is not an error: it counts as zero, but the marker keeps
/// the original text so callers can report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParsedAmount {
    Valid(f64),
    Invalid { raw: String },
}

impl ParsedAmount {
    /// Numeric value, zero for invalid input
    pub fn value(&self) -> f64 {
        match self {
            ParsedAmount::Valid(v) => *v,
            ParsedAmount::Invalid { .. } => 0.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ParsedAmount::Valid(_))
    }
}

impl From<f64> for ParsedAmount {
    fn from(value: f64) -> Self {
        ParsedAmount::Valid(value)
    }
}

/// Addressee of the billing document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

/// A single case to be billed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Running index within the billing run, used for the invoice number
    pub running_index: u32,

    /// Value in dispute underlying the fee calculation
    pub dispute_value: ParsedAmount,

    /// Free-text case reference
    pub case_reference: String,

    /// Addressee
    pub recipient: Recipient,

    /// Invoice date if the source provides one
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
}

impl CaseRecord {
    /// Create a record with a known dispute value and no recipient details
    pub fn new(running_index: u32, dispute_value: f64, case_reference: impl Into<String>) -> Self {
        Self {
            running_index,
            dispute_value: ParsedAmount::Valid(dispute_value),
            case_reference: case_reference.into(),
            recipient: Recipient::default(),
            invoice_date: None,
        }
    }

    pub fn with_recipient(mut self, recipient: Recipient) -> Self {
        self.recipient = recipient;
        self
    }
}
