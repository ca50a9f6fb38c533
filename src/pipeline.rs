//! Pipeline driver — segment, normalise, identify, and hand records to a sink.
//!
//! The driver pulls one block at a time from the [`Segmenter`], so memory use
//! is bounded by the largest single record. Failures are handled according to
//! the configured [`RecoveryPolicy`]; sink rejections are always fatal.

use std::io::BufRead;

use ldifdoc_core::config::{Config, RecoveryPolicy};
use ldifdoc_core::{
    derive_identity, Clock, NormalizeError, NormalizedRecord, Normalizer, Segment, SegmentError,
    Segmenter,
};
use ldifdoc_sink::{DocumentAddress, DocumentSink, SinkError};
use thiserror::Error;
use tracing::{debug, error, info, warn};

// ---------------------------------------------------------------------------
// Options and summary
// ---------------------------------------------------------------------------

/// Knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Number of leading records to fast-forward past without parsing.
    pub skip: u64,
    /// Expected number of records, used only for progress logging.
    pub total: Option<u64>,
    /// Stop after this many documents have been indexed.
    pub limit: Option<u64>,
    /// Index / collection name passed to the sink.
    pub index: String,
    pub on_error: RecoveryPolicy,
    /// Log progress every N records; 0 disables progress logging.
    pub progress_every: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_config(&Config::defaults())
    }
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            skip: 0,
            total: None,
            limit: None,
            index: config.output.index.clone(),
            on_error: config.pipeline.on_error,
            progress_every: config.pipeline.progress_every,
        }
    }
}

/// Counters for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Blocks handed to the normaliser.
    pub blocks: u64,
    /// Blocks fast-forwarded by skip mode.
    pub skipped: u64,
    /// Documents accepted by the sink.
    pub indexed: u64,
    /// Records dropped because they have no `dn`.
    pub dropped_no_dn: u64,
    /// Records that failed to normalise under [`RecoveryPolicy::Skip`].
    pub failed: u64,
    /// Empty blocks (normally the trailing one).
    pub empty: u64,
}

impl RunSummary {
    /// Records seen so far, skipped ones included.
    pub fn records_seen(&self) -> u64 {
        self.blocks + self.skipped
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal pipeline errors. Each carries the data needed to diagnose it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Segment(#[from] SegmentError),

    /// A record failed to normalise under [`RecoveryPolicy::Abort`].
    #[error("invalid data in record {record}: {source}\n{raw}")]
    Record {
        record: u64,
        raw: String,
        #[source]
        source: NormalizeError,
    },

    /// The sink refused a document. `body` is the pretty-printed document.
    #[error("sink rejected document {id}: {source}\n{body}")]
    SinkRejection {
        id: String,
        body: String,
        #[source]
        source: SinkError,
    },

    #[error("failed to flush sink: {0}")]
    Flush(#[source] SinkError),
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run the full pipeline over `reader`, writing documents to `sink`.
pub fn run<R, C, S>(
    reader: R,
    normalizer: &Normalizer<C>,
    sink: &mut S,
    options: &PipelineOptions,
) -> Result<RunSummary, PipelineError>
where
    R: BufRead,
    C: Clock,
    S: DocumentSink + ?Sized,
{
    let mut summary = RunSummary::default();
    info!(skip = options.skip, total = ?options.total, index = %options.index, "pipeline started");

    for segment in Segmenter::with_skip(reader, options.skip) {
        if options.limit.is_some_and(|limit| summary.indexed >= limit) {
            info!(limit = ?options.limit, "record limit reached");
            break;
        }

        match segment? {
            Segment::Skipped => summary.skipped += 1,
            Segment::Block(raw) => {
                summary.blocks += 1;
                let record_no = summary.records_seen();
                match normalizer.normalize(&raw) {
                    Ok(record) => index_record(record, record_no, sink, options, &mut summary)?,
                    Err(NormalizeError::EmptyRecord) => {
                        summary.empty += 1;
                        debug!(record = record_no, "empty block");
                    }
                    Err(source) => match options.on_error {
                        RecoveryPolicy::Abort => {
                            error!(record = record_no, error = %source, raw = %raw, "invalid data");
                            return Err(PipelineError::Record {
                                record: record_no,
                                raw,
                                source,
                            });
                        }
                        RecoveryPolicy::Skip => {
                            warn!(record = record_no, error = %source, raw = %raw, "invalid data, skipping record");
                            summary.failed += 1;
                        }
                    },
                }
            }
        }

        report_progress(&summary, options);
    }

    sink.flush().map_err(PipelineError::Flush)?;

    info!(
        blocks = summary.blocks,
        skipped = summary.skipped,
        indexed = summary.indexed,
        dropped_no_dn = summary.dropped_no_dn,
        failed = summary.failed,
        "pipeline finished"
    );
    Ok(summary)
}

fn index_record<S: DocumentSink + ?Sized>(
    record: NormalizedRecord,
    record_no: u64,
    sink: &mut S,
    options: &PipelineOptions,
    summary: &mut RunSummary,
) -> Result<(), PipelineError> {
    let Some(identity) = derive_identity(&record) else {
        debug!(record = record_no, "no dn, dropping record");
        summary.dropped_no_dn += 1;
        return Ok(());
    };

    let address = DocumentAddress {
        index: options.index.clone(),
        doc_type: identity.doc_type,
        id: identity.id,
        preferred_id: identity.preferred_id,
    };

    if let Err(source) = sink.index(&address, &record) {
        let body = serde_json::to_string_pretty(&record).unwrap_or_default();
        error!(record = record_no, id = %address.id, error = %source, body = %body, "sink rejected document");
        return Err(PipelineError::SinkRejection {
            id: address.id,
            body,
            source,
        });
    }

    summary.indexed += 1;
    Ok(())
}

fn report_progress(summary: &RunSummary, options: &PipelineOptions) {
    if options.progress_every == 0 {
        return;
    }
    let seen = summary.records_seen();
    if seen > 0 && seen % options.progress_every == 0 {
        match options.total {
            Some(total) => info!(seen, total, indexed = summary.indexed, "progress"),
            None => info!(seen, indexed = summary.indexed, "progress"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
