//! Composition failures

use std::fmt;
use thiserror::Error;

/// Which input document a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Content,
    Letterhead,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Content => f.write_str("content"),
            DocumentRole::Letterhead => f.write_str("letterhead"),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ComposeError {
    #[error("failed to decode {role} document: {reason}")]
    Decode { role: DocumentRole, reason: String },

    #[error("letterhead has no pages")]
    EmptyLetterhead,

    #[error("{role} page {page} has no usable MediaBox")]
    MissingPageBox { role: DocumentRole, page: usize },

    #[error("failed to read {role} page {page}: {reason}")]
    PageContent {
        role: DocumentRole,
        page: usize,
        reason: String,
    },

    #[error("failed to encode composed document: {0}")]
    Encode(String),
}

/// A composition failure tied to the invoice it happened for
#[derive(Debug, Clone, Error)]
#[error("invoice {invoice_id}: {source}")]
pub struct InvoiceError {
    pub invoice_id: String,
    #[source]
    pub source: ComposeError,
}
