//! Error types for segmentation and normalisation.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors that fail a single record during normalisation.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A line has neither a `": "` nor a `":"` separator.
    #[error("malformed attribute line (no key/value separator): {line:?}")]
    MalformedLine { line: String },

    /// A known-integer attribute holds non-numeric text.
    #[error("attribute '{key}' must be an integer, got {value:?}: {source}")]
    InvalidIntegerAttribute {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The block carries no attribute lines at all (typically the trailing
    /// block at end of stream).
    #[error("record block is empty")]
    EmptyRecord,
}

/// Errors raised while reading the input stream.
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("failed to read input stream: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = NormalizeError> = std::result::Result<T, E>;
