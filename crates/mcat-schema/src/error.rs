//! Top-level error type for the schema crate.

use mcat_core::CanonicalizationError;
use thiserror::Error;

use crate::document::DocumentError;
use crate::violation::ValidationErrorSet;

/// Any failure surfaced by the schema crate's public operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The record was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationErrorSet),

    /// The input document could not be read or parsed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Canonical bytes could not be produced.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The exported JSON Schema did not compile.
    #[error("failed to build JSON Schema validator: {0}")]
    JsonSchemaBuild(String),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
