//! # Sub-Record Contract
//!
//! Nested value objects are independent leaf schemas. The Basic Profile
//! validator composes them through this trait without knowing their fields.

use serde_json::Value;

use crate::declaration::RecordDecl;
use crate::violation::ValidationErrorSet;

/// A nested record that validates on its own.
///
/// Violations are reported relative to the sub-record's own root; the
/// containing validator prefixes them with the path of the field that holds
/// the sub-record.
pub trait SubRecord: Sized {
    /// Field declarations for this record.
    const DECL: &'static RecordDecl;

    /// Validate a raw value into the typed record.
    ///
    /// # Errors
    ///
    /// Returns every violation found in `raw`.
    fn validate(raw: &Value) -> Result<Self, ValidationErrorSet>;
}

/// Implement `Deserialize` for a record by routing the raw value through its
/// validator, so that deserialization and validation cannot disagree.
macro_rules! impl_validating_deserialize {
    ($ty:ident, $validate:expr) => {
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $validate(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_validating_deserialize;
