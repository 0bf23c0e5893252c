//! Advanced resource section: where to find the code, docs and data.

use mcat_core::HttpUrl;
use serde::Serialize;
use serde_json::Value;

use crate::declaration::{RecordDecl, RESOURCES};
use crate::reader::FieldReader;
use crate::record::{impl_validating_deserialize, SubRecord};
use crate::violation::ValidationErrorSet;

/// Resource links for a catalog item. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Resources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_repository: Option<HttpUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<HttpUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<HttpUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training: Option<HttpUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<HttpUrl>>,
}

impl SubRecord for Resources {
    const DECL: &'static RecordDecl = &RESOURCES;

    fn validate(raw: &Value) -> Result<Self, ValidationErrorSet> {
        let mut reader = FieldReader::new(raw)?;
        let resources = Resources {
            code_repository: reader.url("code_repository"),
            documentation: reader.url("documentation"),
            website: reader.url("website"),
            training: reader.url("training"),
            data: reader.url_list("data"),
        };
        reader.finish(resources)
    }
}

impl_validating_deserialize!(Resources, <Resources as SubRecord>::validate);

#[cfg(test)]
mod tests {
    use super::*;
    use mcat_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn empty_object_is_valid() {
        assert_eq!(Resources::validate(&json!({})).unwrap(), Resources::default());
    }

    #[test]
    fn links_are_kept_verbatim() {
        let raw = json!({
            "code_repository": "https://code.usgs.gov/coawst/coawst",
            "documentation": "https://coawst.readthedocs.io",
            "data": ["https://www.sciencebase.gov/catalog/item/abc", "http://example.org/data.nc"]
        });
        let resources = Resources::validate(&raw).unwrap();
        assert_eq!(serde_json::to_value(&resources).unwrap(), raw);
    }

    #[test]
    fn bad_data_entry_is_indexed() {
        let raw = json!({"data": ["https://example.org/a", "ftp://example.org/b"]});
        let errors = Resources::validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].path.to_string(), "data[1]");
        assert_eq!(errors.violations()[0].kind(), ErrorKind::MalformedUrl);
    }

    #[test]
    fn serialized_keys_are_declared() {
        let raw = json!({
            "code_repository": "https://a.org",
            "documentation": "https://b.org",
            "website": "https://c.org",
            "training": "https://d.org",
            "data": []
        });
        let value = serde_json::to_value(Resources::validate(&raw).unwrap()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), RESOURCES.fields.len());
        assert!(keys.iter().all(|k| RESOURCES.declares(k)));
    }
}
