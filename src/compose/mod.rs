//! Letterhead composition for rendered documents
//!
//! The composer takes encoded PDF bytes and never touches the filesystem
//! while composing. Every call decodes its own copies of both documents, so
//! compositions can run concurrently without coordination.
//!
//! # Example
//!
//! ```rust,ignore
//! let composer = Composer::new(LetterheadTemplate::locate("briefbogen.pdf"));
//! match composer.compose(&rendered)? {
//!     Composition::Stamped(bytes) => std::fs::write("out.pdf", bytes)?,
//!     Composition::PassThrough(bytes) => std::fs::write("out.pdf", bytes)?,
//! }
//! ```

mod error;
mod form;
mod pages;
mod stamp;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{ComposeError, DocumentRole, InvoiceError};
pub use form::PageBox;
pub use pages::{letterhead_page_for, page_plan, PageRole};
pub use stamp::stamp;

use log::{info, warn};
use std::fs;
use std::path::Path;

/// Encoded two-page letterhead: page 0 for first pages, page 1 for the rest
#[derive(Debug, Clone)]
pub struct LetterheadTemplate {
    bytes: Vec<u8>,
}

impl LetterheadTemplate {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Read a letterhead file; a missing or unreadable file yields `None`
    pub fn locate<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => {
                info!("using letterhead {} ({} bytes)", path.display(), bytes.len());
                Some(Self::from_bytes(bytes))
            }
            Err(e) => {
                warn!(
                    "letterhead {} not available ({}), documents stay unstamped",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Result of a composition, tagged with whether a letterhead was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    Stamped(Vec<u8>),
    PassThrough(Vec<u8>),
}

impl Composition {
    pub fn is_stamped(&self) -> bool {
        matches!(self, Composition::Stamped(_))
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Composition::Stamped(b) | Composition::PassThrough(b) => b,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Composition::Stamped(b) | Composition::PassThrough(b) => b,
        }
    }
}

/// Applies an optional letterhead to rendered documents
#[derive(Debug, Clone, Default)]
pub struct Composer {
    letterhead: Option<LetterheadTemplate>,
}

impl Composer {
    pub fn new(letterhead: Option<LetterheadTemplate>) -> Self {
        Self { letterhead }
    }

    pub fn has_letterhead(&self) -> bool {
        self.letterhead.is_some()
    }

    /// Stamp `content` onto the letterhead, or pass it through without one
    pub fn compose(&self, content: &[u8]) -> Result<Composition, ComposeError> {
        match &self.letterhead {
            Some(letterhead) => stamp(content, letterhead.bytes()).map(Composition::Stamped),
            None => Ok(Composition::PassThrough(content.to_vec())),
        }
    }
}
