//! Static attribute tables.
//!
//! Directory exports carry every value as text. The attributes listed here
//! are known to hold integers and are coerced before indexing so the store
//! can treat them numerically.

/// Attribute names whose values are always coerced to `i64`.
pub static KNOWN_INTEGER_ATTRIBUTES: phf::Set<&'static str> = phf::phf_set! {
    "accountExpires",
    "adminCount",
    "appSchemaVersion",
    "badPasswordTime",
    "badPwdCount",
    "carLicense",
    "codePage",
    "countryCode",
    "deliveryMechanism",
    "dLMemDefault",
    "flags",
    "instanceType",
    "internetEncoding",
    "lastLogoff",
    "lastLogon",
    "lastLogonTimestamp",
    "lastUpdateSequence",
    "localeID",
    "localPolicyFlags",
    "lockoutTime",
    "logonCount",
    "primaryGroupID",
    "priority",
    "pwdLastSet",
    "revision",
    "sAMAccountType",
    "versionNumber",
};

/// `true` if `key` is coerced to an integer. Case-sensitive.
pub fn is_integer_attribute(key: &str) -> bool {
    KNOWN_INTEGER_ATTRIBUTES.contains(key)
}
