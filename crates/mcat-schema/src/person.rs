//! # Person
//!
//! Authors and maintainers of a catalog item. Only the name is required.

use mcat_core::HttpUrl;
use serde::Serialize;
use serde_json::Value;

use crate::declaration::{RecordDecl, PERSON};
use crate::reader::FieldReader;
use crate::record::{impl_validating_deserialize, SubRecord};
use crate::violation::ValidationErrorSet;

/// A person credited on, or responsible for, a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    /// Full name.
    pub name: String,
    /// Contact email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Organization or office the person belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    /// ORCID iD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    /// Profile or home page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<HttpUrl>,
}

impl SubRecord for Person {
    const DECL: &'static RecordDecl = &PERSON;

    fn validate(raw: &Value) -> Result<Self, ValidationErrorSet> {
        let mut reader = FieldReader::new(raw)?;
        let person = Person {
            name: reader.required_text("name"),
            email: reader.email("email"),
            affiliation: reader.text("affiliation"),
            orcid: reader.text("orcid"),
            url: reader.url("url"),
        };
        reader.finish(person)
    }
}

impl_validating_deserialize!(Person, <Person as SubRecord>::validate);
