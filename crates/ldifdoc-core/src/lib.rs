//! ldifdoc-core — directory export parsing and normalisation.
//!
//! This crate exposes the two pipeline stages as public modules, plus the
//! shared types, the identity derivation used by sinks, and configuration.
//!
//! # Architecture
//!
//! ```text
//! lines ──► Segmenter ──► Normalizer ──► identity ──► (sink)
//! ```
//!
//! Every stage is synchronous and pull-based; nothing is shared between
//! records.

pub mod attributes;
pub mod clock;
pub mod config;
pub mod error;
pub mod identity;
pub mod normalizer;
pub mod segmenter;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{NormalizeError, SegmentError};
pub use identity::{derive_identity, DocumentIdentity};
pub use normalizer::Normalizer;
pub use segmenter::{Segment, Segmenter};
pub use types::{accumulate, NormalizedRecord, PropertyValue, Scalar};
