//! # Document Loading
//!
//! Reads catalog submissions from disk. `.yaml` / `.yml` files are parsed as
//! YAML and converted to the JSON value model (text keys only, no tags);
//! everything else is parsed as JSON. A top-level array is a batch of records (see [`split_batch`]).

use std::path::Path;

use mcat_core::FieldPath;
use serde_json::{Map, Value};
use thiserror::Error;

/// A document that could not be read or parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load document {path}: {reason}")]
pub struct DocumentError {
    /// Path of the document.
    pub path: String,
    /// What went wrong.
    pub reason: String,
}

/// Serialization format of a submission document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Format implied by the file extension; JSON unless `.yaml` / `.yml`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse document text in the given format.
///
/// # Errors
///
/// Returns a description of the parse or conversion failure.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
            yaml_into_json(yaml, &FieldPath::root()).map_err(|e| format!("unsupported YAML: {e}"))
        }
    }
}

/// Read and parse a submission document.
///
/// # Errors
///
/// Returns `DocumentError` if the file cannot be read or does not parse.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|e| DocumentError {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    let value =
        parse_document(&content, DocumentFormat::from_path(path)).map_err(|reason| DocumentError {
            path: path.display().to_string(),
            reason,
        })?;
    tracing::debug!(path = %path.display(), "loaded document");
    Ok(value)
}

/// The records in a loaded document: the elements of a top-level array, or
/// the document itself.
pub fn split_batch(document: Value) -> Vec<Value> {
    match document {
        Value::Array(records) => records,
        other => vec![other],
    }
}

/// Convert a parsed YAML document to the JSON value model.
///
/// Catalog keys are field names, so mapping keys must be text. Tagged
/// values and numbers with no JSON form are rejected with the location they
/// were found at.
fn yaml_into_json(yaml: serde_yaml::Value, at: &FieldPath) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    let located = |what: String| {
        if at.is_root() {
            what
        } else {
            format!("{what} at {at}")
        }
    };
    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Bool(b) => Ok(Value::Bool(b)),
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Number(n) => {
            json_number(&n).ok_or_else(|| located(format!("number {n} has no JSON form")))
        }
        Yaml::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| yaml_into_json(item, &at.index(idx)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(key) => key,
                    other => {
                        return Err(located(format!(
                            "mapping key {} is not a field name",
                            key_text(&other)
                        )))
                    }
                };
                let value = yaml_into_json(value, &at.key(key.as_str()))?;
                object.insert(key, value);
            }
            Ok(Value::Object(object))
        }
        Yaml::Tagged(tagged) => Err(located(format!("tag {} is not supported", tagged.tag))),
    }
}

fn json_number(n: &serde_yaml::Number) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        return Some(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Value::from(u));
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

fn key_text(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Sequence(_) => "(a sequence)".to_string(),
        serde_yaml::Value::Mapping(_) => "(a mapping)".to_string(),
        serde_yaml::Value::String(s) => format!("{s:?}"),
        serde_yaml::Value::Tagged(tagged) => format!("(tagged {})", tagged.tag),
    }
}
