//! Bulk-format JSON lines writer.
//!
//! Each document becomes two lines: an action line naming the index, type
//! and id, then the document body. The output can be piped straight into a
//! bulk loader.

use std::io::Write;

use ldifdoc_core::NormalizedRecord;
use serde::Serialize;

use crate::{DocumentAddress, DocumentSink, SinkError};

#[derive(Serialize)]
struct Action<'a> {
    index: ActionTarget<'a>,
}

#[derive(Serialize)]
struct ActionTarget<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_type")]
    doc_type: &'a str,
    #[serde(rename = "_id")]
    id: &'a str,
}

/// Writes documents as bulk action/body line pairs to any [`Write`].
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of documents written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DocumentSink for JsonLinesSink<W> {
    fn index(&mut self, address: &DocumentAddress, body: &NormalizedRecord) -> Result<(), SinkError> {
        // Document stores refuse empty field names; a line like ": value"
        // produces one.
        if body.keys().any(str::is_empty) {
            return Err(SinkError::Rejected {
                reason: "field name cannot be an empty string".to_string(),
            });
        }

        let action = Action {
            index: ActionTarget {
                index: &address.index,
                doc_type: &address.doc_type,
                id: &address.id,
            },
        };
        serde_json::to_writer(&mut self.writer, &action)?;
        self.writer.write_all(b"\n")?;
        serde_json::to_writer(&mut self.writer, body)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        tracing::trace!(id = %address.id, doc_type = %address.doc_type, "document written");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
