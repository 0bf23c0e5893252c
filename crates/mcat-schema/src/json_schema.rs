//! # JSON Schema Export
//!
//! Generates a Draft 2020-12 JSON Schema for the Basic Profile from the
//! declaration tables, and validates instances against it with the
//! `jsonschema` crate.
//!
//! The exported schema is an interchange artifact for systems that do not
//! link this crate. It describes the same acceptance rules as
//! [`crate::validate`] with the default options, scalar conversions
//! included (numbers as text, flag words, padded URLs), with two known
//! differences: the `uri` format is an annotation only (the `^https?://`
//! pattern and length limit are enforced, full URL parsing is not), and the
//! URL length limit counts surrounding whitespace.

use serde::Serialize;
use serde_json::{json, Map, Value};

use mcat_core::http_url::MAX_URL_LENGTH;
use mcat_core::SCHEMA_VERSION;

use crate::declaration::{FieldDecl, FieldKind, RecordDecl, BASIC_PROFILE};
use crate::error::SchemaError;
use crate::reader::{FLAG_FALSE_WORDS, FLAG_TRUE_WORDS};

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Required text must contain a non-whitespace character.
const NON_BLANK_PATTERN: &str = r"\S";

/// Mirrors the email shape check: `local@domain.tld`, no whitespace.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s.]+$";

/// Scheme check, case-insensitive without relying on regex flags. Leading
/// whitespace is trimmed by the validator.
const HTTP_URL_PATTERN: &str = r"^\s*[hH][tT][tT][pP][sS]?://";

/// JSON types a text field accepts; numbers are read as their JSON text.
const TEXT_TYPES: [&str; 2] = ["string", "number"];

/// A single JSON Schema violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonSchemaViolation {
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for JsonSchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// The Basic Profile as a Draft 2020-12 JSON Schema, with every
/// sub-record under `$defs`.
pub fn basic_profile_json_schema() -> Value {
    let defs: Map<String, Value> = BASIC_PROFILE
        .referenced_records()
        .into_iter()
        .map(|decl| (decl.name.to_string(), record_schema(decl)))
        .collect();

    let mut schema = record_schema(&BASIC_PROFILE);
    if let Value::Object(map) = &mut schema {
        map.insert("$schema".into(), json!(DRAFT_2020_12));
        map.insert(
            "$comment".into(),
            json!(format!("Basic Profile schema {SCHEMA_VERSION}")),
        );
        map.insert("$defs".into(), Value::Object(defs));
    }
    schema
}

fn record_schema(decl: &RecordDecl) -> Value {
    let properties: Map<String, Value> = decl
        .fields
        .iter()
        .map(|field| (field.name.to_string(), field_schema(field)))
        .collect();
    let required: Vec<&str> = decl.required_fields().collect();
    json!({
        "title": decl.name,
        "description": decl.doc,
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn field_schema(field: &FieldDecl) -> Value {
    let mut base = kind_schema(field.kind);
    if field.required && matches!(field.kind, FieldKind::Text) {
        if let Value::Object(map) = &mut base {
            map.insert("pattern".into(), json!(NON_BLANK_PATTERN));
        }
    }

    let mut schema = if field.required { base } else { nullable(base) };
    if let Value::Object(map) = &mut schema {
        map.insert("description".into(), json!(field.doc));
        if let Some(default) = field.default {
            map.insert("default".into(), default.to_value());
        }
    }
    schema
}

/// Admit `null` alongside `schema`, keeping nested errors addressable at
/// their own instance paths.
fn nullable(schema: Value) -> Value {
    let mut map = match schema {
        Value::Object(map) => map,
        other => return other,
    };
    let admitted = match map.get_mut("type") {
        Some(ty @ Value::String(_)) => {
            *ty = json!([ty.take(), "null"]);
            true
        }
        Some(Value::Array(types)) => {
            types.push(json!("null"));
            true
        }
        _ => false,
    };
    if admitted {
        if let Some(Value::Array(terms)) = map.get_mut("enum") {
            terms.push(Value::Null);
        }
        return Value::Object(map);
    }
    if let Some(Value::Array(branches)) = map.get_mut("anyOf") {
        branches.push(json!({ "type": "null" }));
        return Value::Object(map);
    }
    json!({ "anyOf": [Value::Object(map), { "type": "null" }] })
}

/// `^(?:1|[oO][nN]|...)$` over the accepted flag words, matched in any
/// letter case.
fn flag_word_pattern() -> String {
    let alternatives: Vec<String> = FLAG_TRUE_WORDS
        .iter()
        .chain(FLAG_FALSE_WORDS)
        .map(|word| {
            word.chars()
                .map(|c| {
                    if c.is_ascii_alphabetic() {
                        format!("[{}{}]", c.to_ascii_lowercase(), c.to_ascii_uppercase())
                    } else {
                        c.to_string()
                    }
                })
                .collect()
        })
        .collect();
    format!("^(?:{})$", alternatives.join("|"))
}

fn url_schema() -> Value {
    json!({
        "type": "string",
        "format": "uri",
        "pattern": HTTP_URL_PATTERN,
        "maxLength": MAX_URL_LENGTH,
    })
}

fn def_ref(decl: &RecordDecl) -> Value {
    json!({ "$ref": format!("#/$defs/{}", decl.name) })
}

fn kind_schema(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Text | FieldKind::DateText => json!({ "type": TEXT_TYPES }),
        FieldKind::Email => json!({ "type": "string", "pattern": EMAIL_PATTERN }),
        FieldKind::Bool => json!({
            "anyOf": [
                { "type": "boolean" },
                { "enum": [0, 1] },
                { "type": "string", "pattern": flag_word_pattern() }
            ]
        }),
        FieldKind::Vocabulary(terms) => json!({ "type": "string", "enum": terms() }),
        FieldKind::Url => url_schema(),
        FieldKind::TextList => json!({ "type": "array", "items": { "type": TEXT_TYPES } }),
        FieldKind::UrlList => json!({ "type": "array", "items": url_schema() }),
        FieldKind::Record(decl) => def_ref(decl),
        FieldKind::RecordList(decl) => json!({ "type": "array", "items": def_ref(decl) }),
    }
}

/// Validate `instance` against the exported schema.
///
/// # Errors
///
/// Returns `SchemaError::JsonSchemaBuild` if the exported schema does not
/// compile.
pub fn cross_check(instance: &Value) -> Result<Vec<JsonSchemaViolation>, SchemaError> {
    let schema = basic_profile_json_schema();
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    let validator = opts
        .build(&schema)
        .map_err(|e| SchemaError::JsonSchemaBuild(e.to_string()))?;

    Ok(validator
        .iter_errors(instance)
        .map(|e| JsonSchemaViolation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_every_declared_field() {
        let schema = basic_profile_json_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), BASIC_PROFILE.fields.len());
        assert_eq!(schema["required"], json!(["name", "description"]));
        assert_eq!(schema["$schema"], DRAFT_2020_12);
    }

    #[test]
    fn sub_records_are_defs() {
        let schema = basic_profile_json_schema();
        let defs = schema["$defs"].as_object().unwrap();
        for name in ["Person", "Identifier", "Resources", "References", "RelatedCatalogItem"] {
            assert!(defs.contains_key(name), "missing $defs/{name}");
        }
        assert_eq!(
            schema["properties"]["author"]["items"]["$ref"],
            "#/$defs/Person"
        );
    }

    #[test]
    fn defaults_and_vocabularies_are_exported() {
        let schema = basic_profile_json_schema();
        let item_type = &schema["properties"]["item_type"];
        assert_eq!(item_type["default"], "model");
        assert_eq!(item_type["type"], json!(["string", "null"]));
        assert_eq!(
            item_type["enum"],
            json!(["framework", "model", "testbed", "tool", null])
        );
        assert_eq!(schema["properties"]["license"]["default"], "CC0");
        assert_eq!(schema["properties"]["organization"]["default"], true);
    }

    #[test]
    fn optional_sub_record_admits_null() {
        let schema = basic_profile_json_schema();
        assert_eq!(
            schema["properties"]["resources"]["anyOf"],
            json!([{ "$ref": "#/$defs/Resources" }, { "type": "null" }])
        );
    }

    #[test]
    fn text_fields_admit_numbers() {
        let schema = basic_profile_json_schema();
        assert_eq!(schema["properties"]["name"]["type"], json!(["string", "number"]));
        assert_eq!(
            schema["properties"]["version"]["type"],
            json!(["string", "number", "null"])
        );
        assert_eq!(
            schema["properties"]["science_keywords"]["items"]["type"],
            json!(["string", "number"])
        );
    }

    #[test]
    fn flag_pattern_covers_every_word() {
        assert_eq!(
            flag_word_pattern(),
            "^(?:1|[oO][nN]|[tT]|[tT][rR][uU][eE]|[yY]|[yY][eE][sS]|0|[oO][fF][fF]|[fF]|[fF][aA][lL][sS][eE]|[nN]|[nN][oO])$"
        );
    }

    #[test]
    fn scalar_conversions_pass() {
        let violations = cross_check(&json!({
            "name": 2024,
            "description": "d",
            "version": 3.8,
            "organization": "Off",
            "science_keywords": ["hydrology", 7],
            "image": " https://www.usgs.gov/coawst.png"
        }))
        .unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn minimal_record_passes() {
        let violations = cross_check(&json!({"name": "COAWST", "description": "d"})).unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn bad_record_is_reported_with_pointer() {
        let violations = cross_check(&json!({
            "name": "X",
            "description": "Y",
            "author": [{"name": "A", "email": "not-an-email"}]
        }))
        .unwrap();
        assert!(!violations.is_empty());
        assert!(violations
            .iter()
            .any(|v| v.instance_path == "/author/0/email"));
    }
}
