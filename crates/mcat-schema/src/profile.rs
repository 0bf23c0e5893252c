//! # Basic Profile: Record Validator
//!
//! [`BasicProfile`] is one catalog entry: a model, framework, tool or
//! testbed, with its authorship, provenance, keywords and links.
//!
//! ## Validation
//!
//! [`ProfileValidator::validate`] reads every declared field from a raw JSON
//! object, in declaration order, and either returns the typed record or the
//! full list of rejected fields. Defaults are applied before the defaulted
//! fields are checked:
//!
//! | Field          | Default  |
//! |----------------|----------|
//! | `item_type`    | `model`  |
//! | `organization` | `true`   |
//! | `license`      | `CC0`    |
//!
//! Sub-records are validated by their own [`SubRecord`] implementations;
//! their violations are re-homed under the containing field
//! (`author[2].email`) and wrapped as `NestedValidationFailure`.
//!
//! The [`ValidationOptions`] switches add checks on top of these rules.
//! With the default options the validator accepts exactly what the catalog
//! has always accepted.

use chrono::NaiveDate;
use mcat_core::{
    parse_date_like, CanonicalBytes, CanonicalizationError, FieldError, FieldPath, HttpUrl,
    ItemType, TypeKeyword, DEFAULT_LICENSE, SCHEMA_VERSION,
};
use serde::Serialize;
use serde_json::Value;

use crate::declaration::{RecordDecl, BASIC_PROFILE};
use crate::identifier::Identifier;
use crate::options::ValidationOptions;
use crate::person::Person;
use crate::reader::FieldReader;
use crate::record::impl_validating_deserialize;
use crate::references::References;
use crate::related::RelatedCatalogItem;
use crate::resources::Resources;
use crate::violation::ValidationErrorSet;

/// One validated catalog entry.
///
/// Only constructed by validation (directly or through `Deserialize`), so
/// every instance satisfies the Basic Profile rules. Fields are read through
/// accessors and cannot be changed after validation. Serializes back to the
/// submitted shape with absent optional fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicProfile {
    item_type: ItemType,
    name: String,
    description: String,
    organization: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<Vec<Person>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<Vec<Person>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    how_to_cite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usgs_missionarea: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<Vec<Identifier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    programming_language: Option<String>,
    /// Always present after validation; `CC0` unless stated.
    license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resources: Option<Resources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    references: Option<References>,
    #[serde(skip_serializing_if = "Option::is_none")]
    science_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_keywords: Option<TypeKeyword>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<HttpUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    related_catalog_item: Option<RelatedCatalogItem>,
}

impl BasicProfile {
    /// Field declarations for the Basic Profile.
    pub const DECL: &'static RecordDecl = &BASIC_PROFILE;

    /// Kind of catalog item.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the hosting organization produced the item.
    pub fn organization(&self) -> bool {
        self.organization
    }

    pub fn external_organization_name(&self) -> Option<&str> {
        self.external_organization_name.as_deref()
    }

    /// `release_date` as submitted.
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    /// `last_update` as submitted.
    pub fn last_update(&self) -> Option<&str> {
        self.last_update.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn author(&self) -> Option<&[Person]> {
        self.author.as_deref()
    }

    pub fn contact(&self) -> Option<&[Person]> {
        self.contact.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn how_to_cite(&self) -> Option<&str> {
        self.how_to_cite.as_deref()
    }

    pub fn usgs_missionarea(&self) -> Option<&str> {
        self.usgs_missionarea.as_deref()
    }

    pub fn identifier(&self) -> Option<&[Identifier]> {
        self.identifier.as_deref()
    }

    pub fn programming_language(&self) -> Option<&str> {
        self.programming_language.as_deref()
    }

    /// License name; `CC0` unless the submission stated one.
    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn resources(&self) -> Option<&Resources> {
        self.resources.as_ref()
    }

    pub fn references(&self) -> Option<&References> {
        self.references.as_ref()
    }

    pub fn science_keywords(&self) -> Option<&[String]> {
        self.science_keywords.as_deref()
    }

    pub fn type_keywords(&self) -> Option<TypeKeyword> {
        self.type_keywords
    }

    pub fn other_keywords(&self) -> Option<&str> {
        self.other_keywords.as_deref()
    }

    pub fn image(&self) -> Option<&HttpUrl> {
        self.image.as_ref()
    }

    pub fn related_catalog_item(&self) -> Option<&RelatedCatalogItem> {
        self.related_catalog_item.as_ref()
    }

    /// Version of the schema this record was validated against.
    pub fn schema_version(&self) -> &'static str {
        SCHEMA_VERSION
    }

    /// True when the item was produced outside the hosting organization.
    pub fn is_external(&self) -> bool {
        !self.organization
    }

    /// `release_date` as a calendar date, when it is recognizable as one.
    pub fn parsed_release_date(&self) -> Option<NaiveDate> {
        self.release_date.as_deref().and_then(parse_date_like)
    }

    /// `last_update` as a calendar date, when it is recognizable as one.
    pub fn parsed_last_update(&self) -> Option<NaiveDate> {
        self.last_update.as_deref().and_then(parse_date_like)
    }

    /// The record in its serialized JSON shape.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Canonical (JCS) bytes of the record.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError` if serialization fails.
    pub fn to_canonical_bytes(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(self)
    }
}

/// Validates raw submissions into [`BasicProfile`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileValidator {
    options: ValidationOptions,
}

impl ProfileValidator {
    /// Create a validator with the given opt-in checks.
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// The options this validator applies.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate one raw record.
    ///
    /// # Errors
    ///
    /// Returns every violation found, in declaration order, followed by
    /// any opt-in constraint violations. No partial record is returned.
    pub fn validate(&self, raw: &Value) -> Result<BasicProfile, ValidationErrorSet> {
        let mut reader = FieldReader::new(raw)?;

        let profile = BasicProfile {
            item_type: reader.term::<ItemType>("item_type").unwrap_or_default(),
            name: reader.required_text("name"),
            description: reader.required_text("description"),
            organization: reader.flag("organization", true),
            external_organization_name: reader.text("external_organization_name"),
            release_date: reader.text("release_date"),
            last_update: reader.text("last_update"),
            subtitle: reader.text("subtitle"),
            author: reader.record_list("author"),
            contact: reader.record_list("contact"),
            version: reader.text("version"),
            how_to_cite: reader.text("how_to_cite"),
            usgs_missionarea: reader.text("usgs_missionarea"),
            identifier: reader.record_list("identifier"),
            programming_language: reader.text("programming_language"),
            license: reader
                .text("license")
                .unwrap_or_else(|| DEFAULT_LICENSE.to_string()),
            resources: reader.record("resources"),
            references: reader.record("references"),
            science_keywords: reader.text_list("science_keywords"),
            type_keywords: reader.term::<TypeKeyword>("type_keywords"),
            other_keywords: reader.text("other_keywords"),
            image: reader.url("image"),
            related_catalog_item: reader.record("related_catalog_item"),
        };

        self.check_organization(&mut reader, &profile);
        if self.options.strict_dates {
            check_date(&mut reader, "release_date", profile.release_date.as_deref());
            check_date(&mut reader, "last_update", profile.last_update.as_deref());
        }

        let unknown = reader.unknown_keys(&BASIC_PROFILE);
        if !unknown.is_empty() {
            if self.options.reject_unknown_fields {
                for key in unknown {
                    reader.reject(FieldPath::field(key), FieldError::UnknownField);
                }
            } else {
                tracing::debug!(keys = ?unknown, "ignoring undeclared keys");
            }
        }

        let violations = reader.violation_count();
        if violations == 0 {
            tracing::debug!(name = %profile.name, item_type = %profile.item_type, "basic profile accepted");
        } else {
            tracing::debug!(violations, "basic profile rejected");
        }
        reader.finish(profile)
    }

    fn check_organization(&self, reader: &mut FieldReader<'_>, profile: &BasicProfile) {
        match (profile.organization, &profile.external_organization_name) {
            (false, None) if self.options.require_external_organization_name => {
                reader.reject(
                    FieldPath::field("external_organization_name"),
                    FieldError::ConstraintViolation(
                        "required when organization is false".to_string(),
                    ),
                );
            }
            (true, Some(external)) => {
                tracing::warn!(
                    name = %profile.name,
                    external_organization_name = %external,
                    "external_organization_name is set but organization is true"
                );
            }
            _ => {}
        }
    }
}

fn check_date(reader: &mut FieldReader<'_>, name: &str, text: Option<&str>) {
    let Some(text) = text else {
        return;
    };
    if parse_date_like(text).is_none() {
        reader.reject(
            FieldPath::field(name),
            FieldError::ConstraintViolation(format!(
                "{text:?} is not a date (expected YYYY-MM-DD, YYYY-MM, YYYY or RFC 3339)"
            )),
        );
    }
}

/// Validate one raw record with the default (permissive) options.
///
/// # Errors
///
/// Returns every violation found in `raw`.
pub fn validate(raw: &Value) -> Result<BasicProfile, ValidationErrorSet> {
    ProfileValidator::default().validate(raw)
}

impl_validating_deserialize!(BasicProfile, validate);

#[cfg(test)]
mod tests {
    use super::*;
    use mcat_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn scenario_minimal_record_gets_defaults() {
        let profile = validate(&json!({"name": "COAWST", "description": "sample description"}))
            .unwrap();
        assert_eq!(profile.item_type, ItemType::Model);
        assert_eq!(profile.license, "CC0");
        assert!(profile.organization);
        assert_eq!(profile.external_organization_name, None);
        assert_eq!(profile.author, None);
        assert_eq!(profile.image, None);
        assert_eq!(profile.related_catalog_item, None);
    }

    #[test]
    fn scenario_unknown_item_type() {
        let errors =
            validate(&json!({"name": "X", "description": "Y", "item_type": "simulation"}))
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        let violation = &errors.violations()[0];
        assert_eq!(violation.path.to_string(), "item_type");
        let FieldError::InvalidEnumValue(e) = &violation.error else {
            panic!("expected InvalidEnumValue, got {:?}", violation.error);
        };
        assert_eq!(e.accepted, vec!["framework", "model", "testbed", "tool"]);
    }

    #[test]
    fn scenario_missing_name() {
        let errors = validate(&json!({"description": "only desc"})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].path.to_string(), "name");
        assert_eq!(errors.violations()[0].kind(), ErrorKind::MissingRequiredField);
    }

    #[test]
    fn scenario_type_keyword_is_case_sensitive() {
        let errors = validate(&json!({
            "name": "X", "description": "Y", "type_keywords": "stochastic"
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].kind(), ErrorKind::InvalidEnumValue);
        assert!(errors.to_string().contains("Stochastic"));
    }

    #[test]
    fn scenario_malformed_image() {
        let errors =
            validate(&json!({"name": "X", "description": "Y", "image": "not-a-url"})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].path.to_string(), "image");
        assert_eq!(errors.violations()[0].kind(), ErrorKind::MalformedUrl);
    }

    #[test]
    fn both_required_fields_reported_together() {
        let errors = validate(&json!({})).unwrap_err();
        let paths: Vec<_> = errors.iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, vec!["name", "description"]);
    }

    #[test]
    fn nested_error_is_prefixed_and_wrapped() {
        let errors = validate(&json!({
            "name": "X",
            "description": "Y",
            "author": [
                {"name": "A"},
                {"name": "B"},
                {"name": "C", "email": "c-at-usgs.gov"}
            ]
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        let violation = &errors.violations()[0];
        assert_eq!(violation.path.to_string(), "author[2].email");
        assert_eq!(violation.kind(), ErrorKind::NestedValidationFailure);
        assert_eq!(violation.error.root_cause().kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn non_object_sub_record_is_type_mismatch_at_field() {
        let errors =
            validate(&json!({"name": "X", "description": "Y", "resources": "https://a.org"}))
                .unwrap_err();
        assert_eq!(errors.violations()[0].path.to_string(), "resources");
        assert_eq!(errors.violations()[0].kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn organization_accepts_integers() {
        let profile =
            validate(&json!({"name": "X", "description": "Y", "organization": 0})).unwrap();
        assert!(profile.is_external());
    }

    #[test]
    fn permissive_external_organization_by_default() {
        let raw = json!({"name": "X", "description": "Y", "organization": false});
        assert!(validate(&raw).is_ok());

        let strict = ProfileValidator::new(ValidationOptions {
            require_external_organization_name: true,
            ..ValidationOptions::default()
        });
        let errors = strict.validate(&raw).unwrap_err();
        assert_eq!(errors.violations()[0].path.to_string(), "external_organization_name");
        assert_eq!(errors.violations()[0].kind(), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn strict_dates_reject_free_text() {
        let raw = json!({
            "name": "X", "description": "Y",
            "release_date": "spring 2019", "last_update": "2023-06"
        });
        let profile = validate(&raw).unwrap();
        assert_eq!(profile.parsed_release_date(), None);
        assert_eq!(
            profile.parsed_last_update(),
            NaiveDate::from_ymd_opt(2023, 6, 1)
        );

        let strict = ProfileValidator::new(ValidationOptions {
            strict_dates: true,
            ..ValidationOptions::default()
        });
        let errors = strict.validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].path.to_string(), "release_date");
    }

    #[test]
    fn unknown_fields_ignored_unless_rejected() {
        let raw = json!({"name": "X", "description": "Y", "colour": "blue"});
        assert!(validate(&raw).is_ok());

        let strict = ProfileValidator::new(ValidationOptions {
            reject_unknown_fields: true,
            ..ValidationOptions::default()
        });
        let errors = strict.validate(&raw).unwrap_err();
        assert_eq!(errors.violations()[0].path.to_string(), "colour");
        assert_eq!(errors.violations()[0].kind(), ErrorKind::UnknownField);
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let profile = validate(&json!({"name": "COAWST", "description": "d"})).unwrap();
        assert_eq!(
            profile.to_value().unwrap(),
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
    fn serialized_keys_are_declared() {
        let profile = validate(&json!({"name": "COAWST", "description": "d"})).unwrap();
        let value = profile.to_value().unwrap();
        for key in value.as_object().unwrap().keys() {
            assert!(BasicProfile::DECL.declares(key), "{key} not declared");
        }
    }

    #[test]
    fn deserialize_routes_through_validation() {
        let ok: Result<BasicProfile, _> =
            serde_json::from_str(r#"{"name": "COAWST", "description": "d", "item_type": "tool"}"#);
        assert_eq!(ok.unwrap().item_type, ItemType::Tool);

        let err = serde_json::from_str::<BasicProfile>(r#"{"name": "COAWST"}"#).unwrap_err();
        assert!(err.to_string().contains("description: field required"));
    }

    #[test]
    fn accessors_expose_validated_values() {
        let profile = validate(&json!({
            "name": "COAWST",
            "description": "d",
            "version": "3.8",
            "science_keywords": ["hydrology"],
            "image": "https://www.usgs.gov/coawst.png"
        }))
        .unwrap();
        assert_eq!(profile.name(), "COAWST");
        assert_eq!(profile.item_type(), ItemType::Model);
        assert_eq!(profile.license(), "CC0");
        assert!(profile.organization());
        assert_eq!(profile.version(), Some("3.8"));
        assert_eq!(profile.science_keywords(), Some(&["hydrology".to_string()][..]));
        assert_eq!(
            profile.image().map(HttpUrl::as_str),
            Some("https://www.usgs.gov/coawst.png")
        );
        assert_eq!(profile.author(), None);
    }

    #[test]
    fn schema_version_is_module_constant() {
        let profile = validate(&json!({"name": "X", "description": "Y"})).unwrap();
        assert_eq!(profile.schema_version(), "v1.0.0");
    }
}
