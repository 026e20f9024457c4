//! Invoice data handed to the external document renderer
//!
//! `InvoiceData` keeps the case metadata and the amount breakdown as named
//! parts. Renderers that need flat input use [`InvoiceData::template_record`]
//! with an explicit [`AmountFormat`].

mod format;

pub use format::AmountFormat;

use crate::calculation::AmountBreakdown;
use crate::case::{CaseRecord, Recipient};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a billing document shows for one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub case_reference: String,
    pub dispute_value: f64,
    /// False when the source dispute value could not be parsed
    pub dispute_value_valid: bool,
    pub recipient: Recipient,
    pub amounts: AmountBreakdown,
}

impl InvoiceData {
    /// Merge a case with its breakdown; `fallback_date` applies when the case has no date
    pub fn new(record: &CaseRecord, amounts: AmountBreakdown, fallback_date: NaiveDate) -> Self {
        let invoice_date = record.invoice_date.unwrap_or(fallback_date);
        Self {
            invoice_number: invoice_number(invoice_date, record.running_index),
            invoice_date,
            case_reference: record.case_reference.clone(),
            dispute_value: record.dispute_value.value(),
            dispute_value_valid: record.dispute_value.is_valid(),
            recipient: record.recipient.clone(),
            amounts,
        }
    }

    /// Flat key-value record with dotted keys and formatted amounts
    pub fn template_record(&self, fmt: &AmountFormat) -> BTreeMap<String, String> {
        let a = &self.amounts;
        let mut record = BTreeMap::new();
        let mut put = |key: &str, value: String| {
            record.insert(key.to_string(), value);
        };

        put("invoice.number", self.invoice_number.clone());
        put("invoice.date", self.invoice_date.format("%d.%m.%Y").to_string());
        put("case.reference", self.case_reference.clone());
        put("case.dispute_value", fmt.format(self.dispute_value));
        put("case.band", a.band.to_string());

        put("recipient.name", self.recipient.name.clone());
        put("recipient.street", self.recipient.street.clone());
        put("recipient.postal_code", self.recipient.postal_code.clone());
        put("recipient.city", self.recipient.city.clone());

        put("fees.dispute_fee", fmt.format(a.fees.dispute_fee));
        put("fees.proceedings_fee", fmt.format(a.fees.proceedings_fee));
        put("fees.hearing_fee", fmt.format(a.fees.hearing_fee));
        put("fees.settlement_fee", fmt.format(a.fees.settlement_fee));

        put("expenses.flat_allowance", fmt.format(a.expenses.flat_allowance));
        put("expenses.surcharge", fmt.format(a.expenses.surcharge));

        put("cash_outlays.court_costs", fmt.format(a.cash_outlays.court_costs));
        put("cash_outlays.travel_costs", fmt.format(a.cash_outlays.travel_costs));
        put("cash_outlays.copy_costs", fmt.format(a.cash_outlays.copy_costs));

        put("totals.fees_subtotal", fmt.format(a.totals.fees_subtotal));
        put("totals.expenses_subtotal", fmt.format(a.totals.expenses_subtotal));
        put("totals.outlays_subtotal", fmt.format(a.totals.outlays_subtotal));
        put("totals.pre_tax", fmt.format(a.totals.pre_tax_total));
        put("totals.tax", fmt.format(a.totals.tax));
        put("totals.post_tax", fmt.format(a.totals.post_tax_total));

        record
    }
}

/// `YYYY-NNNN` from the invoice year and the running index
pub fn invoice_number(date: NaiveDate, running_index: u32) -> String {
    format!("{}-{:04}", date.year(), running_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::Calculator;
    use crate::case::ParsedAmount;

    fn sample_case() -> CaseRecord {
        CaseRecord::new(42, 600_000.0, "12 O 345/25").with_recipient(Recipient {
            name: "Muster GmbH".to_string(),
            street: "Hauptstr. 1".to_string(),
            postal_code: "10115".to_string(),
            city: "Berlin".to_string(),
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_invoice_number() {
        assert_eq!(invoice_number(today(), 42), "2026-0042");
        assert_eq!(invoice_number(today(), 12345), "2026-12345");
    }

    #[test]
    fn test_case_date_wins_over_fallback() {
        let mut case = sample_case();
        case.invoice_date = NaiveDate::from_ymd_opt(2025, 12, 31);
        let amounts = Calculator::default().compute(&case);

        let data = InvoiceData::new(&case, amounts, today());
        assert_eq!(data.invoice_number, "2025-0042");
    }

    #[test]
    fn test_template_record() {
        let case = sample_case();
        let amounts = Calculator::default().compute(&case);
        let data = InvoiceData::new(&case, amounts, today());

        let record = data.template_record(&AmountFormat::german());
        assert_eq!(record["invoice.number"], "2026-0042");
        assert_eq!(record["invoice.date"], "16.10.2026");
        assert_eq!(record["recipient.name"], "Muster GmbH");
        assert_eq!(record["case.dispute_value"], "600.000,00 €");
        assert_eq!(record["case.band"], "2");
        assert_eq!(record["fees.dispute_fee"], "8.898,70 €");
        assert_eq!(record["expenses.surcharge"], "399,78 €");
        assert_eq!(record["totals.pre_tax"], "9.318,48 €");
        assert_eq!(record["totals.tax"], "1.770,51 €");
        assert_eq!(record["totals.post_tax"], "11.088,99 €");
    }

    #[test]
    fn test_invalid_dispute_value_is_flagged() {
        let mut case = sample_case();
        case.dispute_value = ParsedAmount::Invalid { raw: "k.A.".to_string() };
        let amounts = Calculator::default().compute(&case);

        let data = InvoiceData::new(&case, amounts, today());
        assert!(!data.dispute_value_valid);
        assert_eq!(data.dispute_value, 0.0);
    }

    #[test]
    fn test_json_keeps_nested_parts() {
        let case = sample_case();
        let data = InvoiceData::new(&case, Calculator::default().compute(&case), today());

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["amounts"]["band"], 2);
        assert!(json["amounts"]["fees"]["dispute_fee"].is_number());
        assert_eq!(json["invoice_date"], "2026-10-16");
    }
}
