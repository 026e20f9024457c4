//! Amount breakdown produced for one case

use serde::{Deserialize, Serialize};

/// Fee positions: the banded fee plus the fixed baseline fees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    /// Fee derived from the dispute value band
    pub dispute_fee: f64,
    pub proceedings_fee: f64,
    pub hearing_fee: f64,
    pub settlement_fee: f64,
}

/// Expense positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expenses {
    pub flat_allowance: f64,
    /// Share of the proceedings fee, see `FeeSchedule::surcharge_rate`
    pub surcharge: f64,
}

/// Reimbursable cash outlays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashOutlays {
    pub court_costs: f64,
    pub travel_costs: f64,
    pub copy_costs: f64,
}

/// Subtotals and totals, each rounded to cents where it was computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub fees_subtotal: f64,
    pub expenses_subtotal: f64,
    /// Computed and exposed, but not part of the pre-tax total
    pub outlays_subtotal: f64,
    pub pre_tax_total: f64,
    pub tax: f64,
    pub post_tax_total: f64,
}

/// Complete breakdown for one case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountBreakdown {
    /// Number of started bands above the threshold (negative below it)
    pub band: i64,
    pub fees: Fees,
    pub expenses: Expenses,
    pub cash_outlays: CashOutlays,
    pub totals: CalculationResult,
}
