//! ldifdoc — directory export to flat key/value documents.
//!
//! Reads a line-oriented directory export (records separated by `#` lines,
//! attributes written as `key: value`), normalises each record into a typed
//! document, and hands it to a document sink. This crate holds the pipeline
//! driver and the binary's logging setup; parsing lives in `ldifdoc-core`
//! and the sink adapters in `ldifdoc-sink`.
//!
//! # Architecture
//!
//! ```text
//! input ──► Segmenter ──► Normalizer ──► identity ──► DocumentSink
//! ```
//!
//! Everything runs on one thread, one record at a time.

pub mod logging;
pub mod pipeline;

pub use pipeline::{run, PipelineError, PipelineOptions, RunSummary};
