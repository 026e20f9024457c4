//! Fee calculation engine
//!
//! Every intermediate amount is rounded to cents before it feeds the next
//! step. Summing at full precision and rounding at the end gives different
//! totals.

use crate::case::CaseRecord;
use crate::schedule::FeeSchedule;
use super::breakdown::{AmountBreakdown, CalculationResult, CashOutlays, Expenses, Fees};

/// Round half away from zero to 2 decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pure calculator over a fixed fee schedule
#[derive(Debug, Clone)]
pub struct Calculator {
    schedule: FeeSchedule,
}

impl Calculator {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Compute the breakdown for a case
    ///
    /// Never fails. An unparseable dispute value has already become zero, and
    /// values below the threshold produce a negative band and a reduced fee.
    pub fn compute(&self, record: &CaseRecord) -> AmountBreakdown {
        self.compute_value(record.dispute_value.value())
    }

    /// Compute the breakdown for a bare dispute value
    pub fn compute_value(&self, dispute_value: f64) -> AmountBreakdown {
        let s = &self.schedule;
        let band = self.band(dispute_value);
        let dispute_fee = self.banded_fee(dispute_value);

        let fees = Fees {
            dispute_fee,
            proceedings_fee: s.proceedings_fee,
            hearing_fee: s.hearing_fee,
            settlement_fee: s.settlement_fee,
        };
        let expenses = Expenses {
            flat_allowance: s.flat_allowance,
            surcharge: round2(s.proceedings_fee * s.surcharge_rate),
        };
        let cash_outlays = CashOutlays {
            court_costs: s.court_costs,
            travel_costs: s.travel_costs,
            copy_costs: s.copy_costs,
        };

        AmountBreakdown {
            band,
            fees,
            expenses,
            cash_outlays,
            totals: self.totals_from(&fees, &expenses, &cash_outlays),
        }
    }

    /// Number of started bands above the threshold
    ///
    /// A value exactly on a band boundary stays in the lower band; one cent
    /// more starts the next one.
    pub fn band(&self, dispute_value: f64) -> i64 {
        let s = &self.schedule;
        ((dispute_value - s.threshold) / s.band_size).ceil() as i64
    }

    /// Banded fee: `(base + band * step) * fee_factor`, rounded to cents
    pub fn banded_fee(&self, dispute_value: f64) -> f64 {
        let s = &self.schedule;
        let band = self.band(dispute_value) as f64;
        round2((s.base + band * s.step) * s.fee_factor)
    }

    /// Subtotals and totals from already rounded positions
    ///
    /// The pre-tax total is accumulated in two rounded steps: fees plus
    /// allowance, then plus surcharge.
    pub fn totals_from(&self, fees: &Fees, expenses: &Expenses, outlays: &CashOutlays) -> CalculationResult {
        let fees_subtotal = fees.dispute_fee;
        let expenses_subtotal = round2(expenses.flat_allowance + expenses.surcharge);
        let outlays_subtotal = round2(outlays.court_costs + outlays.travel_costs + outlays.copy_costs);

        let mut pre_tax_total = round2(fees_subtotal + expenses.flat_allowance);
        pre_tax_total = round2(pre_tax_total + expenses.surcharge);

        let tax = round2(pre_tax_total * self.schedule.tax_rate);
        let post_tax_total = round2(pre_tax_total + tax);

        CalculationResult {
            fees_subtotal,
            expenses_subtotal,
            outlays_subtotal,
            pre_tax_total,
            tax,
            post_tax_total,
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(FeeSchedule::default_schedule())
    }
}
