//! # Error Taxonomy
//!
//! Structured error types for catalog record validation, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! A rejected field is described by a [`FieldError`]. Each variant maps to
//! exactly one stable [`ErrorKind`], which is what callers match on when
//! rendering form errors or reports. The message text is for humans and may
//! change; the kind may not.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable classification of a field-level validation failure.
///
/// The serialized names are part of the report format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A required field is absent, `null`, or blank.
    MissingRequiredField,
    /// The value is present but has the wrong JSON type.
    TypeMismatch,
    /// The value is not a member of the field's closed vocabulary.
    InvalidEnumValue,
    /// The value does not parse as an acceptable HTTP(S) URL.
    #[serde(rename = "MalformedURL")]
    MalformedUrl,
    /// A nested sub-record rejected one of its own fields.
    NestedValidationFailure,
    /// An opt-in constraint (cross-field or format) was violated.
    ConstraintViolation,
    /// The key is not declared by the schema and unknown keys are rejected.
    UnknownField,
}

impl ErrorKind {
    /// Returns the report name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "MissingRequiredField",
            Self::TypeMismatch => "TypeMismatch",
            Self::InvalidEnumValue => "InvalidEnumValue",
            Self::MalformedUrl => "MalformedURL",
            Self::NestedValidationFailure => "NestedValidationFailure",
            Self::ConstraintViolation => "ConstraintViolation",
            Self::UnknownField => "UnknownField",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate value that is not in a closed vocabulary.
///
/// Carries the offending value, the field it was submitted for, and the
/// accepted values in sorted order so the caller can show them verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value {value:?} for `{field}`; expected one of: {}", .accepted.join(", "))]
pub struct VocabularyError {
    /// Field the value was submitted for.
    pub field: &'static str,
    /// The rejected candidate, exactly as submitted.
    pub value: String,
    /// Accepted wire values, sorted.
    pub accepted: Vec<&'static str>,
}

/// Why a single field was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Required field absent or `null`.
    #[error("field required")]
    Missing,

    /// Required text field present but empty or whitespace-only.
    #[error("field required; blank text is not accepted")]
    Blank,

    /// Value present with the wrong JSON type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Semantic type the field declares.
        expected: &'static str,
        /// JSON type actually submitted.
        found: &'static str,
    },

    /// Value outside the field's closed vocabulary.
    #[error(transparent)]
    InvalidEnumValue(#[from] VocabularyError),

    /// Value is not an acceptable HTTP(S) URL.
    #[error("invalid URL {value:?}: {reason}")]
    MalformedUrl {
        /// The rejected text.
        value: String,
        /// Parser or policy reason.
        reason: String,
    },

    /// A nested sub-record rejected one of its fields.
    #[error("invalid {record}: {source}")]
    NestedValidationFailure {
        /// Name of the sub-record schema (e.g. `Person`).
        record: &'static str,
        /// The sub-record's own error.
        source: Box<FieldError>,
    },

    /// An opt-in constraint was violated.
    #[error("{0}")]
    ConstraintViolation(String),

    /// Key not declared by the schema.
    #[error("unknown field")]
    UnknownField,
}

impl FieldError {
    /// The stable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Missing | Self::Blank => ErrorKind::MissingRequiredField,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::InvalidEnumValue(_) => ErrorKind::InvalidEnumValue,
            Self::MalformedUrl { .. } => ErrorKind::MalformedUrl,
            Self::NestedValidationFailure { .. } => ErrorKind::NestedValidationFailure,
            Self::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            Self::UnknownField => ErrorKind::UnknownField,
        }
    }

    /// Wrap this error as coming from inside the named sub-record.
    pub fn nested(self, record: &'static str) -> Self {
        Self::NestedValidationFailure {
            record,
            source: Box::new(self),
        }
    }

    /// The innermost error, unwrapping every level of nesting.
    pub fn root_cause(&self) -> &FieldError {
        match self {
            Self::NestedValidationFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
