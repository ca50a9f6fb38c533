//! Core types for ldifdoc-core.
//!
//! This module defines the data model shared across the pipeline: the
//! [`Scalar`] attribute value, the multi-valued [`PropertyValue`], and the
//! [`NormalizedRecord`] document handed to a sink.

use serde::Serialize;
use std::collections::BTreeMap;

/// Key injected into every record with the wall-clock time of normalisation.
pub const IMPORTED_ON_KEY: &str = "x_imported_on";

/// `strftime` pattern shared by `x_imported_on` and every derived timestamp key.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// A single attribute value, either text or a signed 64-bit integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            Scalar::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(text) => write!(f, "{text}"),
            Scalar::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

/// The value stored under one property name.
///
/// A key seen once holds a [`PropertyValue::Scalar`]; a repeated key is
/// promoted to a [`PropertyValue::Sequence`] that keeps every occurrence in
/// first-seen order, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl PropertyValue {
    /// All values as a slice. A scalar is a one-element slice.
    pub fn values(&self) -> &[Scalar] {
        match self {
            PropertyValue::Scalar(value) => std::slice::from_ref(value),
            PropertyValue::Sequence(values) => values,
        }
    }

    /// The first-seen value.
    pub fn first(&self) -> Option<&Scalar> {
        self.values().first()
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, PropertyValue::Sequence(_))
    }
}

impl From<Scalar> for PropertyValue {
    fn from(value: Scalar) -> Self {
        PropertyValue::Scalar(value)
    }
}

/// Merge a newly seen value into whatever is already stored for a key.
///
/// Absent → scalar, scalar → two-element sequence, sequence → appended.
pub fn accumulate(existing: Option<PropertyValue>, new: Scalar) -> PropertyValue {
    match existing {
        None => PropertyValue::Scalar(new),
        Some(PropertyValue::Scalar(first)) => PropertyValue::Sequence(vec![first, new]),
        Some(PropertyValue::Sequence(mut values)) => {
            values.push(new);
            PropertyValue::Sequence(values)
        }
    }
}

/// A normalised directory entry ready to be indexed.
///
/// Serialises as a flat JSON object of property name to scalar or array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    properties: BTreeMap<String, PropertyValue>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`, applying [`accumulate`].
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        let key = key.into();
        let existing = self.properties.remove(&key);
        self.properties.insert(key, accumulate(existing, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Remove a property, returning its value. Used to compare records while
    /// ignoring `x_imported_on`.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    pub fn into_properties(self) -> BTreeMap<String, PropertyValue> {
        self.properties
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
