//! # Identifier
//!
//! External identifiers assigned to a catalog item: DOIs, IPDS numbers,
//! project codes. The scheme is free text; the catalog does not maintain a
//! closed list of schemes.

use mcat_core::HttpUrl;
use serde::Serialize;
use serde_json::Value;

use crate::declaration::{RecordDecl, IDENTIFIER};
use crate::reader::FieldReader;
use crate::record::{impl_validating_deserialize, SubRecord};
use crate::violation::ValidationErrorSet;

/// An external identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    /// Identifier scheme, e.g. `DOI`.
    #[serde(rename = "type")]
    pub scheme: String,
    /// The identifier itself.
    pub value: String,
    /// Resolvable link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<HttpUrl>,
}

impl SubRecord for Identifier {
    const DECL: &'static RecordDecl = &IDENTIFIER;

    fn validate(raw: &Value) -> Result<Self, ValidationErrorSet> {
        let mut reader = FieldReader::new(raw)?;
        let identifier = Identifier {
            scheme: reader.required_text("type"),
            value: reader.required_text("value"),
            url: reader.url("url"),
        };
        reader.finish(identifier)
    }
}

impl_validating_deserialize!(Identifier, <Identifier as SubRecord>::validate);
