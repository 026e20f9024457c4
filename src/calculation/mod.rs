//! Fee and amount calculation for a single case

mod breakdown;
mod engine;

pub use breakdown::{AmountBreakdown, CalculationResult, CashOutlays, Expenses, Fees};
pub use engine::{round2, Calculator};
