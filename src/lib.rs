//! Letterhead Billing - fee calculation and letterhead composition for case invoices
//!
//! This library provides:
//! - Case record ingestion from German-locale CSV exports
//! - Banded fee calculation with cent rounding at every step
//! - Invoice data and flat template records for external renderers
//! - Composition of rendered PDFs onto a first/continuation letterhead
//! - Parallel batch composition with per-invoice fallback

pub mod case;
pub mod schedule;
pub mod calculation;
pub mod invoice;
pub mod compose;
pub mod batch;

// Re-export commonly used types
pub use case::{CaseRecord, ParsedAmount, Recipient};
pub use schedule::FeeSchedule;
pub use calculation::{AmountBreakdown, Calculator, round2};
pub use invoice::{AmountFormat, InvoiceData};
pub use compose::{Composer, Composition, ComposeError, LetterheadTemplate};
pub use batch::{BatchRunner, BatchSummary, InvoiceJob, InvoiceOutcome, OutcomeStatus};
