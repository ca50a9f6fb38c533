//! In-memory sink that records every write.

use ldifdoc_core::NormalizedRecord;

use crate::{DocumentAddress, DocumentSink, SinkError};

/// Keeps every indexed document in order. Optionally rejects documents that
/// contain a given property, to exercise rejection handling.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub documents: Vec<(DocumentAddress, NormalizedRecord)>,
    reject_key: Option<String>,
    flushed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any document carrying `key`.
    pub fn rejecting(key: impl Into<String>) -> Self {
        Self {
            reject_key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.documents.iter().map(|(a, _)| a.id.as_str()).collect()
    }

    pub fn was_flushed(&self) -> bool {
        self.flushed
    }
}

impl DocumentSink for MemorySink {
    fn index(&mut self, address: &DocumentAddress, body: &NormalizedRecord) -> Result<(), SinkError> {
        if let Some(key) = &self.reject_key {
            if body.contains_key(key) {
                return Err(SinkError::Rejected {
                    reason: format!("field {key:?} is not allowed"),
                });
            }
        }
        self.documents.push((address.clone(), body.clone()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushed = true;
        Ok(())
    }
}
