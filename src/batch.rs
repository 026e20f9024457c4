//! Batch runner for composing many invoices
//!
//! Each invoice is composed on its own rayon task. A failed composition is
//! logged and the invoice falls back to its unstamped document; the rest of
//! the batch is unaffected.

use crate::compose::{Composer, Composition, InvoiceError, LetterheadTemplate};
use log::{info, warn};
use rayon::prelude::*;

/// A rendered document waiting for its letterhead
#[derive(Debug, Clone)]
pub struct InvoiceJob {
    pub invoice_id: String,
    pub content: Vec<u8>,
}

impl InvoiceJob {
    pub fn new(invoice_id: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            content,
        }
    }
}

/// How an invoice left the batch
#[derive(Debug, Clone)]
pub enum OutcomeStatus {
    /// Letterhead applied
    Stamped,
    /// No letterhead configured
    Unstamped,
    /// Composition failed; the unstamped document is used instead
    Fallback { error: InvoiceError },
}

#[derive(Debug, Clone)]
pub struct InvoiceOutcome {
    pub invoice_id: String,
    /// Final document bytes
    pub bytes: Vec<u8>,
    pub status: OutcomeStatus,
}

impl InvoiceOutcome {
    pub fn is_stamped(&self) -> bool {
        matches!(self.status, OutcomeStatus::Stamped)
    }
}

/// Counts per outcome status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub stamped: usize,
    pub unstamped: usize,
    pub fallback: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[InvoiceOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut summary, outcome| {
            match outcome.status {
                OutcomeStatus::Stamped => summary.stamped += 1,
                OutcomeStatus::Unstamped => summary.unstamped += 1,
                OutcomeStatus::Fallback { .. } => summary.fallback += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.stamped + self.unstamped + self.fallback
    }
}

/// Composes batches of invoices against one optional letterhead
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    composer: Composer,
}

impl BatchRunner {
    pub fn new(letterhead: Option<LetterheadTemplate>) -> Self {
        Self::with_composer(Composer::new(letterhead))
    }

    pub fn with_composer(composer: Composer) -> Self {
        Self { composer }
    }

    /// Compose all jobs in parallel; outcomes keep the job order
    pub fn run(&self, jobs: &[InvoiceJob]) -> Vec<InvoiceOutcome> {
        let outcomes: Vec<InvoiceOutcome> = jobs.par_iter().map(|job| self.process(job)).collect();

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            "batch done: {} stamped, {} unstamped, {} fallback",
            summary.stamped, summary.unstamped, summary.fallback
        );
        outcomes
    }

    /// Compose a single job
    pub fn process(&self, job: &InvoiceJob) -> InvoiceOutcome {
        let (bytes, status) = match self.composer.compose(&job.content) {
            Ok(Composition::Stamped(bytes)) => (bytes, OutcomeStatus::Stamped),
            Ok(Composition::PassThrough(bytes)) => (bytes, OutcomeStatus::Unstamped),
            Err(source) => {
                let error = InvoiceError {
                    invoice_id: job.invoice_id.clone(),
                    source,
                };
                warn!("{}; keeping unstamped document", error);
                (job.content.clone(), OutcomeStatus::Fallback { error })
            }
        };

        InvoiceOutcome {
            invoice_id: job.invoice_id.clone(),
            bytes,
            status,
        }
    }
}
