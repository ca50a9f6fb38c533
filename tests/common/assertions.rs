//! Domain-specific assertion macros for ldifdoc harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! property was wrong and what the record actually held.

use ldifdoc_core::types::IMPORTED_ON_KEY;
use ldifdoc_core::NormalizedRecord;

// ---------------------------------------------------------------------------
// Property assertions
// ---------------------------------------------------------------------------

/// Assert that a property serialises to the expected JSON value.
///
/// ```rust
/// assert_property!(record, "mail", ["a@x.com", "b@x.com"]);
/// assert_property!(record, "logonCount", 42);
/// ```
#[macro_export]
macro_rules! assert_property {
    ($record:expr, $key:expr, $($value:tt)+) => {{
        let record: &ldifdoc_core::NormalizedRecord = &$record;
        let key: &str = $key;
        let expected = serde_json::json!($($value)+);
        match record.get(key) {
            Some(actual) => {
                let actual = serde_json::to_value(actual).unwrap();
                if actual != expected {
                    panic!(
                        "assert_property! failed:\n  record[{:?}]\n  expected: {}\n  actual:   {}",
                        key, expected, actual
                    );
                }
            }
            None => panic!(
                "assert_property! failed: property {:?} not found.\n  Available: {:?}",
                key,
                record.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a property is absent.
#[macro_export]
macro_rules! assert_absent {
    ($record:expr, $key:expr) => {{
        let record: &ldifdoc_core::NormalizedRecord = &$record;
        let key: &str = $key;
        if let Some(value) = record.get(key) {
            panic!(
                "assert_absent! failed: property {:?} present with value {:?}",
                key, value
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Record helpers
// ---------------------------------------------------------------------------

/// Drop `x_imported_on` so records normalised at different instants can be
/// compared.
pub fn without_import_time(mut record: NormalizedRecord) -> NormalizedRecord {
    record.remove(IMPORTED_ON_KEY);
    record
}
