//! Advanced reference section: publications and releases that describe or
//! use a catalog item. Citations are free text.

use mcat_core::HttpUrl;
use serde::Serialize;
use serde_json::Value;

use crate::declaration::{RecordDecl, REFERENCES};
use crate::reader::FieldReader;
use crate::record::{impl_validating_deserialize, SubRecord};
use crate::violation::ValidationErrorSet;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct References {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_releases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_releases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_links: Option<Vec<HttpUrl>>,
}

impl SubRecord for References {
    const DECL: &'static RecordDecl = &REFERENCES;

    fn validate(raw: &Value) -> Result<Self, ValidationErrorSet> {
        let mut reader = FieldReader::new(raw)?;
        let references = References {
            publications: reader.text_list("publications"),
            data_releases: reader.text_list("data_releases"),
            software_releases: reader.text_list("software_releases"),
            related_links: reader.url_list("related_links"),
        };
        reader.finish(references)
    }
}

impl_validating_deserialize!(References, <References as SubRecord>::validate);
