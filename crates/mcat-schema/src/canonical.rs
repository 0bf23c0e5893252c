//! # Canonical Form of a Submission
//!
//! [`canonicalize`] computes, from a raw submission alone, the JSON a
//! successful validation serializes to:
//!
//! - `null` members and undeclared keys are dropped, at every record level;
//! - declared defaults are filled in;
//! - numbers in text fields become their JSON text;
//! - `organization` given as a number or a flag word becomes a boolean;
//! - URL text is trimmed.
//!
//! For any input that validates, `validate(raw)?.to_value()? ==
//! canonicalize(raw)`. Input that does not validate is normalized on a
//! best-effort basis; values of the wrong type are passed through as-is.

use serde_json::{Map, Value};

use crate::declaration::{FieldKind, RecordDecl, BASIC_PROFILE};
use crate::reader::as_flag;

/// Canonical form of a raw Basic Profile submission.
pub fn canonicalize(raw: &Value) -> Value {
    canonicalize_record(&BASIC_PROFILE, raw)
}

/// Canonical form of a raw record of any declared type.
pub fn canonicalize_record(decl: &RecordDecl, raw: &Value) -> Value {
    let Value::Object(map) = raw else {
        return raw.clone();
    };
    let mut out = Map::new();
    for field in decl.fields {
        match map.get(field.name).filter(|v| !v.is_null()) {
            Some(value) => {
                out.insert(field.name.to_string(), canonicalize_field(field.kind, value));
            }
            None => {
                if let Some(default) = field.default {
                    out.insert(field.name.to_string(), default.to_value());
                }
            }
        }
    }
    Value::Object(out)
}

fn number_as_text(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        other => other.clone(),
    }
}

fn trimmed_url(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other.clone(),
    }
}

fn canonicalize_field(kind: FieldKind, value: &Value) -> Value {
    match (kind, value) {
        (FieldKind::Text | FieldKind::DateText | FieldKind::Email, _) => number_as_text(value),
        (FieldKind::Bool, _) => as_flag(value).map_or_else(|| value.clone(), Value::Bool),
        (FieldKind::Url, _) => trimmed_url(value),
        (FieldKind::TextList, Value::Array(items)) => {
            Value::Array(items.iter().map(number_as_text).collect())
        }
        (FieldKind::UrlList, Value::Array(items)) => {
            Value::Array(items.iter().map(trimmed_url).collect())
        }
        (FieldKind::Record(decl), _) => canonicalize_record(decl, value),
        (FieldKind::RecordList(decl), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| canonicalize_record(decl, item))
                .collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::validate;
    use serde_json::json;

    #[test]
    fn defaults_are_filled() {
        assert_eq!(
            canonicalize(&json!({"name": "COAWST", "description": "d"})),
            json!({
                "item_type": "model",
                "name": "COAWST",
                "description": "d",
                "organization": true,
                "license": "CC0"
            })
        );
    }

    #[test]
    fn nulls_and_unknown_keys_are_dropped_at_every_level() {
        let raw = json!({
            "name": "X",
            "description": "Y",
            "subtitle": null,
            "license": null,
            "colour": "blue",
            "author": [{"name": "A", "email": null, "phone": "555"}],
            "related_catalog_item": {"related_catalog_items": ["WRF"], "note": "x"}
        });
        let canonical = canonicalize(&raw);
        assert_eq!(canonical["license"], "CC0");
        assert!(canonical.get("subtitle").is_none());
        assert!(canonical.get("colour").is_none());
        assert_eq!(canonical["author"], json!([{"name": "A"}]));
        assert_eq!(
            canonical["related_catalog_item"],
            json!({"related_catalog_items": ["WRF"]})
        );
    }

    #[test]
    fn organization_integer_becomes_bool() {
        let canonical = canonicalize(&json!({"name": "X", "description": "Y", "organization": 0}));
        assert_eq!(canonical["organization"], false);
    }

    #[test]
    fn organization_words_become_bool() {
        let canonical =
            canonicalize(&json!({"name": "X", "description": "Y", "organization": "No"}));
        assert_eq!(canonical["organization"], false);
        let canonical =
            canonicalize(&json!({"name": "X", "description": "Y", "organization": "sometimes"}));
        assert_eq!(canonical["organization"], "sometimes");
    }

    #[test]
    fn scalar_conversions_match_validation() {
        let raw = json!({
            "name": 2024,
            "description": "Y",
            "version": 3.8,
            "release_date": 2019,
            "organization": "yes",
            "science_keywords": ["hydrology", 7],
            "image": "  https://www.usgs.gov/coawst.png ",
            "resources": {"data": [" https://a.org/d.csv"], "website": "https://a.org\t"}
        });
        let canonical = canonicalize(&raw);
        assert_eq!(canonical["name"], "2024");
        assert_eq!(canonical["version"], "3.8");
        assert_eq!(canonical["release_date"], "2019");
        assert_eq!(canonical["organization"], true);
        assert_eq!(canonical["science_keywords"], json!(["hydrology", "7"]));
        assert_eq!(canonical["image"], "https://www.usgs.gov/coawst.png");
        assert_eq!(
            canonical["resources"],
            json!({"data": ["https://a.org/d.csv"], "website": "https://a.org"})
        );
        assert_eq!(validate(&raw).unwrap().to_value().unwrap(), canonical);
    }

    #[test]
    fn matches_serialized_record() {
        let raw = json!({
            "name": "COAWST",
            "description": "Coupled Ocean-Atmosphere-Wave-Sediment Transport",
            "organization": 1,
            "item_type": "framework",
            "author": [{"name": "John Warner", "email": "jcwarner@usgs.gov", "extra": true}],
            "identifier": [{"type": "DOI", "value": "10.5066/P9XXXXXX"}],
            "resources": {"code_repository": "https://github.com/DOI-USGS/COAWST"},
            "science_keywords": ["coastal processes", "sediment transport"],
            "type_keywords": "Physics-based",
            "image": "https://www.usgs.gov/coawst.png",
            "unused": null
        });
        let profile = validate(&raw).unwrap();
        assert_eq!(profile.to_value().unwrap(), canonicalize(&raw));
    }

    #[test]
    fn non_object_passes_through() {
        assert_eq!(canonicalize(&json!([1, 2])), json!([1, 2]));
    }
}
