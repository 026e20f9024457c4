//! Fee schedule: every constant the fee formula depends on
//!
//! The schedule is configuration, not derived from case data. A single value is
//! built once (defaults or CSV) and passed explicitly to the calculator.

pub mod loader;

pub use loader::{ScheduleError, DEFAULT_SCHEDULE_FILE};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Constants of the banded fee formula and the fixed billing positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Base amount of the banded fee before the factor is applied
    pub base: f64,

    /// Increment added per started band above the threshold
    pub step: f64,

    /// Width of one dispute-value band
    pub band_size: f64,

    /// Dispute value at which banding starts
    pub threshold: f64,

    /// Multiplier applied to `base + band * step`
    pub fee_factor: f64,

    /// Baseline proceedings fee, also the basis for the surcharge
    pub proceedings_fee: f64,

    /// Baseline hearing fee
    pub hearing_fee: f64,

    /// Baseline settlement fee
    pub settlement_fee: f64,

    /// Flat allowance for postage and telecommunication
    pub flat_allowance: f64,

    /// Share of the proceedings fee charged as surcharge
    pub surcharge_rate: f64,

    /// Reimbursable court costs
    pub court_costs: f64,

    /// Reimbursable travel costs
    pub travel_costs: f64,

    /// Reimbursable copy costs
    pub copy_costs: f64,

    /// Value added tax rate
    pub tax_rate: f64,
}

impl FeeSchedule {
    /// Built-in schedule used when no schedule file is given
    pub fn default_schedule() -> Self {
        Self {
            base: 3539.0,
            step: 165.0,
            band_size: 50_000.0,
            threshold: 500_000.0,
            fee_factor: 2.3,
            proceedings_fee: 1332.60,
            hearing_fee: 1229.60,
            settlement_fee: 1024.70,
            flat_allowance: 20.00,
            surcharge_rate: 0.3,
            court_costs: 0.0,
            travel_costs: 0.0,
            copy_costs: 0.0,
            tax_rate: 0.19,
        }
    }

    /// Load a schedule from a `Name,Value` CSV file, starting from the defaults
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleError> {
        loader::load_schedule(path.as_ref())
    }

    /// Load a schedule from any reader holding `Name,Value` CSV
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, ScheduleError> {
        loader::load_schedule_from_reader(reader)
    }

    /// Mutable access to a constant by its CSV name
    pub(crate) fn entry_mut(&mut self, name: &str) -> Option<&mut f64> {
        let slot = match name {
            "Base" => &mut self.base,
            "Step" => &mut self.step,
            "BandSize" => &mut self.band_size,
            "Threshold" => &mut self.threshold,
            "FeeFactor" => &mut self.fee_factor,
            "ProceedingsFee" => &mut self.proceedings_fee,
            "HearingFee" => &mut self.hearing_fee,
            "SettlementFee" => &mut self.settlement_fee,
            "FlatAllowance" => &mut self.flat_allowance,
            "SurchargeRate" => &mut self.surcharge_rate,
            "CourtCosts" => &mut self.court_costs,
            "TravelCosts" => &mut self.travel_costs,
            "CopyCosts" => &mut self.copy_costs,
            "TaxRate" => &mut self.tax_rate,
            _ => return None,
        };
        Some(slot)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::default_schedule()
    }
}
