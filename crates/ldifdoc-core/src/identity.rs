//! Document identity and classification for normalised records.
//!
//! A record is addressed by the SHA-1 of its distinguished name and typed by
//! its object classes. Records without a `dn` are not indexable.

use sha1::{Digest, Sha1};
use std::collections::BTreeSet;

use crate::types::{NormalizedRecord, Scalar};

/// Label used when a record carries no `objectClass`.
pub const NO_OBJECT_CLASS: &str = "no_objectClass";

pub const DN_KEY: &str = "dn";
pub const OBJECT_CLASS_KEY: &str = "objectClass";
pub const OBJECT_GUID_KEY: &str = "objectGUID";

/// Where a record goes in the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIdentity {
    /// Classification label, see [`classification_label`].
    pub doc_type: String,
    /// Identifier actually used for the write: lowercase hex SHA-1 of `dn`.
    pub id: String,
    /// The record's `objectGUID`, if any. Handed to the sink alongside `id`
    /// but never used in its place.
    pub preferred_id: Option<String>,
}

/// Sorted, deduplicated `objectClass` values joined with `-`, or
/// [`NO_OBJECT_CLASS`].
pub fn classification_label(record: &NormalizedRecord) -> String {
    match record.get(OBJECT_CLASS_KEY) {
        None => NO_OBJECT_CLASS.to_string(),
        Some(value) => value
            .values()
            .iter()
            .map(Scalar::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
            .join("-"),
    }
}

/// Lowercase hex SHA-1 of the first `dn` value, or `None` when the record
/// has no `dn`.
pub fn document_id(record: &NormalizedRecord) -> Option<String> {
    let dn = record.get(DN_KEY)?.first()?.to_string();
    Some(hex::encode(Sha1::digest(dn.as_bytes())))
}

/// Derive the full [`DocumentIdentity`], or `None` for records that must be
/// dropped.
pub fn derive_identity(record: &NormalizedRecord) -> Option<DocumentIdentity> {
    let id = document_id(record)?;
    Some(DocumentIdentity {
        doc_type: classification_label(record),
        id,
        preferred_id: record
            .get(OBJECT_GUID_KEY)
            .and_then(|value| value.first())
            .map(Scalar::to_string),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
