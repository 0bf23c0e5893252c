//! # Violation Reports
//!
//! A failed validation produces a [`ValidationErrorSet`]: every rejected
//! field, in declaration order, each tagged with the path that produced it.
//! Nothing is returned as a record when the set is non-empty.

use std::fmt;

use mcat_core::{ErrorKind, FieldError, FieldPath};
use serde::Serialize;
use thiserror::Error;

/// One rejected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Where the value sits in the submitted record.
    pub path: FieldPath,
    /// Why it was rejected.
    pub error: FieldError,
}

impl Violation {
    /// Create a violation at `path`.
    pub fn new(path: FieldPath, error: FieldError) -> Self {
        Self { path, error }
    }

    /// Stable classification of this violation.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Re-home a sub-record violation under the field that holds the
    /// sub-record, wrapping the error as a nested failure of `record`.
    pub fn nest_under(self, prefix: &FieldPath, record: &'static str) -> Self {
        Self {
            path: self.path.prefixed(prefix),
            error: self.error.nested(record),
        }
    }

    /// The flat `(field_path, error_kind, message)` form used in reports.
    pub fn to_record(&self) -> ViolationRecord {
        ViolationRecord {
            field_path: self.path.to_string(),
            error_kind: self.kind(),
            message: self.error.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "  (root): {}", self.error)
        } else {
            write!(f, "  {}: {}", self.path, self.error)
        }
    }
}

/// Serializable report row for one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationRecord {
    /// Dotted/indexed field path, empty for the record root.
    pub field_path: String,
    /// Stable error classification.
    pub error_kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Every violation found in one validation pass, in the order found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} validation error(s):\n{}", .violations.len(), DisplayList(.violations))]
pub struct ValidationErrorSet {
    violations: Vec<Violation>,
}

impl ValidationErrorSet {
    /// Wrap a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// A set holding one violation.
    pub fn single(path: FieldPath, error: FieldError) -> Self {
        Self::new(vec![Violation::new(path, error)])
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Violations whose rendered path equals `path`.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.path.to_string() == path)
    }

    /// Violations of the given kind.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter().filter(move |v| v.kind() == kind)
    }

    /// The flat report form.
    pub fn to_records(&self) -> Vec<ViolationRecord> {
        self.violations.iter().map(Violation::to_record).collect()
    }
}

impl<'a> IntoIterator for &'a ValidationErrorSet {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Newline-separated rendering of a violation list.
struct DisplayList<'a>(&'a [Violation]);

impl fmt::Display for DisplayList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
