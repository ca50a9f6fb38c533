//! Normalizer — parses one raw record block into a [`NormalizedRecord`].
//!
//! Every attribute line goes through three typing passes, in order:
//! generalized-timestamp detection on the raw text, integer coercion for the
//! known-integer attributes, then FILETIME detection on integer values.
//! Derived timestamp keys are added next to the original key, which keeps
//! its value.

use chrono::{DateTime, NaiveDate, Utc};

use crate::attributes::is_integer_attribute;
use crate::clock::{Clock, SystemClock};
use crate::error::{NormalizeError, Result};
use crate::types::{NormalizedRecord, Scalar, IMPORTED_ON_KEY, TIMESTAMP_FORMAT};

/// Suffix of the key derived from a generalized timestamp.
pub const UNIX_SUFFIX: &str = "_UNIX";
/// Suffix of the key derived from a FILETIME integer.
pub const W32_SUFFIX: &str = "_w32";

const GENERALIZED_TIME_LEN: usize = 17;
const GENERALIZED_TIME_SUFFIX: &str = ".0Z";

// Exclusive bounds, roughly years 1917 to 2234.
const FILETIME_MIN: i64 = 100_000_000_000_000_000;
const FILETIME_MAX: i64 = 200_000_000_000_000_000;
const FILETIME_TICKS_PER_SECOND: i64 = 10_000_000;
/// Seconds between 1601-01-01 and 1970-01-01.
const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Converts raw record blocks into normalised records.
///
/// The clock is injected so `x_imported_on` can be pinned in tests.
#[derive(Debug, Clone, Default)]
pub struct Normalizer<C = SystemClock> {
    clock: C,
}

impl Normalizer<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> Normalizer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Normalise one record block.
    ///
    /// Fails on the first line with no key/value separator and on the first
    /// known-integer attribute with non-numeric text. A block with no
    /// attribute lines fails with [`NormalizeError::EmptyRecord`].
    pub fn normalize(&self, block: &str) -> Result<NormalizedRecord> {
        if block.trim().is_empty() {
            return Err(NormalizeError::EmptyRecord);
        }

        let mut record = NormalizedRecord::new();
        record.add_property(IMPORTED_ON_KEY, format_timestamp(self.clock.now()));

        for line in block.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) =
                split_attribute(line).ok_or_else(|| NormalizeError::MalformedLine {
                    line: line.to_string(),
                })?;
            add_attribute(&mut record, key, value)?;
        }

        Ok(record)
    }
}

fn add_attribute(record: &mut NormalizedRecord, key: &str, raw: &str) -> Result<()> {
    let mut value = Scalar::Text(raw.to_string());

    if is_generalized_timestamp(raw) {
        let instant = match parse_generalized_timestamp(raw) {
            Some(instant) => instant,
            None => {
                tracing::debug!(key, value = raw, "unparsable generalized timestamp, storing 0");
                value = Scalar::Integer(0);
                DateTime::<Utc>::UNIX_EPOCH
            }
        };
        record.add_property(format!("{key}{UNIX_SUFFIX}"), format_timestamp(instant));
    }

    if is_integer_attribute(key) {
        if let Scalar::Text(text) = &value {
            let parsed = text.trim().parse::<i64>().map_err(|source| {
                NormalizeError::InvalidIntegerAttribute {
                    key: key.to_string(),
                    value: text.clone(),
                    source,
                }
            })?;
            value = Scalar::Integer(parsed);
        }
    }

    if let Scalar::Integer(ticks) = value {
        if is_filetime(ticks) {
            if let Some(formatted) = format_unix_seconds(filetime_to_unix_seconds(ticks)) {
                record.add_property(format!("{key}{W32_SUFFIX}"), formatted);
            }
        }
    }

    record.add_property(key, value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Line splitting
// ---------------------------------------------------------------------------

/// Split an attribute line into `(property name, value)`.
///
/// Tries the first `": "` and falls back to the first bare `":"` (base64
/// values written as `key:: data` and exports that omit the space). Any
/// sub-type qualifier left on the key (`;binary`, `;lang-fr`, a trailing
/// `:`) is dropped. Returns `None` when the line has no colon at all.
pub fn split_attribute(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(": ").or_else(|| line.split_once(':'))?;
    Some((property_name(key), value))
}

fn property_name(key: &str) -> &str {
    let key = key.split_once(':').map_or(key, |(head, _)| head);
    key.split_once(';').map_or(key, |(head, _)| head)
}

// ---------------------------------------------------------------------------
// Timestamp encodings
// ---------------------------------------------------------------------------

/// `true` for values shaped like `YYYYMMDDHHMMSS.0Z`. Says nothing about
/// whether the digits form a valid date.
pub fn is_generalized_timestamp(value: &str) -> bool {
    value.chars().count() == GENERALIZED_TIME_LEN && value.ends_with(GENERALIZED_TIME_SUFFIX)
}

/// Parse a `YYYYMMDDHHMMSS.0Z` value as a UTC instant.
pub fn parse_generalized_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let digits = value.strip_suffix(GENERALIZED_TIME_SUFFIX)?;
    if digits.len() != 14 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let field = |from: usize, to: usize| digits.get(from..to)?.parse::<u32>().ok();

    let year = digits.get(0..4)?.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, field(4, 6)?, field(6, 8)?)?
        .and_hms_opt(field(8, 10)?, field(10, 12)?, field(12, 14)?)
        .map(|naive| naive.and_utc())
}

/// `true` if an integer falls strictly inside the FILETIME detection window.
pub fn is_filetime(value: i64) -> bool {
    FILETIME_MIN < value && value < FILETIME_MAX
}

/// Convert 100-ns ticks since 1601-01-01 UTC to whole Unix seconds.
pub fn filetime_to_unix_seconds(ticks: i64) -> i64 {
    ticks.div_euclid(FILETIME_TICKS_PER_SECOND) - FILETIME_UNIX_OFFSET_SECS
}

/// Format an instant as `YYYY-MM-DD-HH-MM-SS`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

fn format_unix_seconds(secs: i64) -> Option<String> {
    DateTime::from_timestamp(secs, 0).map(format_timestamp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
