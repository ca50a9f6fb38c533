//! ldifdoc-sink — document sink adapters for ldifdoc.
//!
//! A sink accepts one normalised record per call, addressed by index name,
//! classification label and identifier. Each adapter decides how (and
//! whether) the document is stored; a structural rejection is reported as
//! [`SinkError::Rejected`] and is fatal to the run.

pub mod json_lines;
pub mod memory;

pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;

use ldifdoc_core::NormalizedRecord;
use thiserror::Error;

/// Address of one document write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAddress {
    pub index: String,
    pub doc_type: String,
    pub id: String,
    /// Passed through from `objectGUID`; informational only.
    pub preferred_id: Option<String>,
}

/// Errors a sink can raise for a single write.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The document is structurally invalid for this sink.
    #[error("document rejected: {reason}")]
    Rejected { reason: String },

    #[error("failed to write document: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to serialise document: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

/// Trait implemented by each document destination.
pub trait DocumentSink {
    fn index(&mut self, address: &DocumentAddress, body: &NormalizedRecord) -> Result<(), SinkError>;

    /// Flush anything buffered. Called once at the end of a run.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: DocumentSink + ?Sized> DocumentSink for &mut S {
    fn index(&mut self, address: &DocumentAddress, body: &NormalizedRecord) -> Result<(), SinkError> {
        (**self).index(address, body)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}
