//! Test builders — ergonomic constructors for normalisers, exports and options.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::cell::Cell;

use chrono::{DateTime, TimeZone, Utc};
use ldifdoc::PipelineOptions;
use ldifdoc_core::{Clock, FixedClock, NormalizedRecord, Normalizer, Segment, Segmenter};

// ---------------------------------------------------------------------------
// Clocks and normalisers
// ---------------------------------------------------------------------------

/// 2024-01-15 10:00:00 UTC, see [`FIXED_IMPORT_TIME`](super::FIXED_IMPORT_TIME).
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

pub fn test_normalizer() -> Normalizer<FixedClock> {
    Normalizer::with_clock(FixedClock(fixed_instant()))
}

/// Normalise a block with the fixed clock, panicking on error.
pub fn normalize(block: &str) -> NormalizedRecord {
    test_normalizer()
        .normalize(block)
        .unwrap_or_else(|e| panic!("normalize failed: {e}\n{block}"))
}

/// A fixed clock that counts how often it is read. The normaliser reads the
/// clock exactly once per record it builds, so this doubles as a call
/// counter for the normaliser.
#[derive(Debug, Default)]
pub struct CountingClock {
    reads: Cell<u64>,
}

impl CountingClock {
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }
}

impl Clock for CountingClock {
    fn now(&self) -> DateTime<Utc> {
        self.reads.set(self.reads.get() + 1);
        fixed_instant()
    }
}

// ---------------------------------------------------------------------------
// Segmentation helpers
// ---------------------------------------------------------------------------

pub fn segment_all(input: &str, skip: u64) -> Vec<Segment> {
    Segmenter::with_skip(input.as_bytes(), skip)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

/// Only the emitted block texts, skipped markers dropped.
pub fn blocks(input: &str) -> Vec<String> {
    segment_all(input, 0)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Block(raw) => Some(raw),
            Segment::Skipped => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ExportBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for export text.
///
/// # Example
///
/// ```rust
/// let export = ExportBuilder::new()
///     .entry(&[("dn", "CN=a"), ("cn", "a")])
///     .blank_lines(2)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ExportBuilder {
    out: String,
}

impl ExportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `#` boundary followed by the given attribute lines.
    pub fn entry(mut self, attributes: &[(&str, &str)]) -> Self {
        self.out.push_str("# entry\n");
        for (key, value) in attributes {
            self.out.push_str(&format!("{key}: {value}\n"));
        }
        self
    }

    /// Append a raw line verbatim (a newline is added).
    pub fn line(mut self, line: &str) -> Self {
        self.out.push_str(line);
        self.out.push('\n');
        self
    }

    pub fn blank_lines(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.out.push('\n');
        }
        self
    }

    pub fn build(self) -> String {
        self.out
    }
}

// ---------------------------------------------------------------------------
// Pipeline options
// ---------------------------------------------------------------------------

/// Default options with progress logging disabled.
pub fn quiet_options() -> PipelineOptions {
    PipelineOptions {
        progress_every: 0,
        ..PipelineOptions::default()
    }
}
