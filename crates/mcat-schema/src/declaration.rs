//! # Field Declarations
//!
//! The catalog schema as data: one [`RecordDecl`] per record type, listing
//! each field's name, semantic kind, requiredness, default and
//! documentation. The typed validators in this crate are written by hand;
//! these tables describe the same fields for consumers that work on raw
//! JSON (canonicalization, JSON Schema export, documentation).
//!
//! Tests in each record module assert that its table and its serialized
//! form list the same keys.

use mcat_core::{ItemType, TypeKeyword, Vocabulary, DEFAULT_LICENSE};
use serde_json::Value;

/// Semantic type of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Date-like free text (see `mcat_core::parse_date_like`).
    DateText,
    /// Email address text.
    Email,
    /// Boolean; the integers 0 and 1 are also accepted.
    Bool,
    /// A term from a closed vocabulary; the function returns the sorted terms.
    Vocabulary(fn() -> Vec<&'static str>),
    /// An absolute HTTP(S) URL.
    Url,
    /// Ordered sequence of free text.
    TextList,
    /// Ordered sequence of HTTP(S) URLs.
    UrlList,
    /// A nested sub-record.
    Record(&'static RecordDecl),
    /// Ordered sequence of nested sub-records.
    RecordList(&'static RecordDecl),
}

/// Value applied when a field is absent or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// A boolean default.
    Bool(bool),
    /// A text default.
    Text(&'static str),
}

impl DefaultValue {
    /// The default as JSON.
    pub fn to_value(self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(b),
            Self::Text(s) => Value::String(s.to_string()),
        }
    }
}

/// One declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    /// Wire key.
    pub name: &'static str,
    /// Semantic type.
    pub kind: FieldKind,
    /// Whether absence is an error.
    pub required: bool,
    /// Applied when absent.
    pub default: Option<DefaultValue>,
    /// Human-readable documentation.
    pub doc: &'static str,
}

/// A record type's declared fields, in wire order.
#[derive(Debug)]
pub struct RecordDecl {
    /// Record type name, used in nested error reports and `$defs`.
    pub name: &'static str,
    /// Human-readable documentation.
    pub doc: &'static str,
    /// Declared fields.
    pub fields: &'static [FieldDecl],
}

impl RecordDecl {
    /// Look up a field by wire key.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `name` is a declared key.
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// Wire keys, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Sub-records referenced by this record, directly or transitively,
    /// each listed once.
    pub fn referenced_records(&'static self) -> Vec<&'static RecordDecl> {
        let mut out: Vec<&'static RecordDecl> = Vec::new();
        collect_records(self, &mut out);
        out
    }
}

fn collect_records(decl: &'static RecordDecl, out: &mut Vec<&'static RecordDecl>) {
    for field in decl.fields {
        if let FieldKind::Record(sub) | FieldKind::RecordList(sub) = field.kind {
            if !out.iter().any(|known| known.name == sub.name) {
                out.push(sub);
                collect_records(sub, out);
            }
        }
    }
}

const fn optional(name: &'static str, kind: FieldKind, doc: &'static str) -> FieldDecl {
    FieldDecl {
        name,
        kind,
        required: false,
        default: None,
        doc,
    }
}

const fn required(name: &'static str, kind: FieldKind, doc: &'static str) -> FieldDecl {
    FieldDecl {
        name,
        kind,
        required: true,
        default: None,
        doc,
    }
}

const fn defaulted(
    name: &'static str,
    kind: FieldKind,
    default: DefaultValue,
    doc: &'static str,
) -> FieldDecl {
    FieldDecl {
        name,
        kind,
        required: false,
        default: Some(default),
        doc,
    }
}

fn item_type_terms() -> Vec<&'static str> {
    ItemType::accepted()
}

fn type_keyword_terms() -> Vec<&'static str> {
    TypeKeyword::accepted()
}

/// A person credited on, or responsible for, a catalog item.
pub static PERSON: RecordDecl = RecordDecl {
    name: "Person",
    doc: "A person credited on, or responsible for, a catalog item.",
    fields: &[
        required("name", FieldKind::Text, "Full name."),
        optional("email", FieldKind::Email, "Contact email address."),
        optional("affiliation", FieldKind::Text, "Organization or office the person belongs to."),
        optional("orcid", FieldKind::Text, "ORCID iD, e.g. 0000-0002-1825-0097."),
        optional("url", FieldKind::Url, "Profile or home page."),
    ],
};

/// An external identifier assigned to a catalog item.
pub static IDENTIFIER: RecordDecl = RecordDecl {
    name: "Identifier",
    doc: "An external identifier assigned to the item (DOI, IPDS number, project ID).",
    fields: &[
        required("type", FieldKind::Text, "Identifier scheme, e.g. DOI, IPDS, ProjectID."),
        required("value", FieldKind::Text, "The identifier itself."),
        optional("url", FieldKind::Url, "Resolvable link for the identifier."),
    ],
};

/// Advanced resource links.
pub static RESOURCES: RecordDecl = RecordDecl {
    name: "Resources",
    doc: "Advanced resource section: where to get the code, documentation and data.",
    fields: &[
        optional("code_repository", FieldKind::Url, "Source code repository."),
        optional("documentation", FieldKind::Url, "User or technical documentation."),
        optional("website", FieldKind::Url, "Project home page."),
        optional("training", FieldKind::Url, "Training materials or tutorials."),
        optional("data", FieldKind::UrlList, "Input, output or example data sets."),
    ],
};

/// Advanced citation links.
pub static REFERENCES: RecordDecl = RecordDecl {
    name: "References",
    doc: "Advanced reference section: publications and releases describing the item.",
    fields: &[
        optional("publications", FieldKind::TextList, "Citations of publications describing or using the item."),
        optional("data_releases", FieldKind::TextList, "Citations of associated data releases."),
        optional("software_releases", FieldKind::TextList, "Citations of software releases."),
        optional("related_links", FieldKind::UrlList, "Other related pages."),
    ],
};

/// Links to other catalog items.
pub static RELATED_CATALOG_ITEM: RecordDecl = RecordDecl {
    name: "RelatedCatalogItem",
    doc: "Other catalog items this one is coupled with or derived from (e.g. COAWST - WRF).",
    fields: &[
        optional("related_catalog_items", FieldKind::TextList, "Names of the related catalog items."),
        optional("related_catalog_item_types", FieldKind::Text, "Kind of relation or of the related items."),
    ],
};

/// The Basic Profile: one catalog entry.
pub static BASIC_PROFILE: RecordDecl = RecordDecl {
    name: "BasicProfile",
    doc: "Basic metadata profile describing one model, framework, tool or testbed.",
    fields: &[
        defaulted(
            "item_type",
            FieldKind::Vocabulary(item_type_terms),
            DefaultValue::Text("model"),
            "model, framework, tool or testbed.",
        ),
        required("name", FieldKind::Text, "Title of the item."),
        required("description", FieldKind::Text, "Abstract or general description."),
        defaulted(
            "organization",
            FieldKind::Bool,
            DefaultValue::Bool(true),
            "true when produced by the hosting organization, false when external.",
        ),
        optional(
            "external_organization_name",
            FieldKind::Text,
            "Producing organization, meaningful when organization is false.",
        ),
        optional("release_date", FieldKind::DateText, "Date of first release."),
        optional("last_update", FieldKind::DateText, "Date of the latest update."),
        optional("subtitle", FieldKind::Text, "Short secondary title."),
        optional("author", FieldKind::RecordList(&PERSON), "The author(s) or developer(s) of this content."),
        optional("contact", FieldKind::RecordList(&PERSON), "Person(s) responsible for maintenance of the item."),
        optional("version", FieldKind::Text, "Latest release version, e.g. v1.0.0."),
        optional("how_to_cite", FieldKind::Text, "Preferred citation."),
        optional("usgs_missionarea", FieldKind::Text, "USGS mission area."),
        optional("identifier", FieldKind::RecordList(&IDENTIFIER), "Identifiers related to the item."),
        optional(
            "programming_language",
            FieldKind::Text,
            "Primary programming language used by the item.",
        ),
        defaulted(
            "license",
            FieldKind::Text,
            DefaultValue::Text(DEFAULT_LICENSE),
            "License; CC0 (https://creativecommons.org/publicdomain/zero/1.0/legalcode) unless stated.",
        ),
        optional("resources", FieldKind::Record(&RESOURCES), "Advanced resource section."),
        optional("references", FieldKind::Record(&REFERENCES), "Advanced reference section."),
        optional(
            "science_keywords",
            FieldKind::TextList,
            "Topical science keywords, preferably terms from the USGS Thesaurus (https://apps.usgs.gov/thesaurus/).",
        ),
        optional(
            "type_keywords",
            FieldKind::Vocabulary(type_keyword_terms),
            "Methodological type of the item.",
        ),
        optional(
            "other_keywords",
            FieldKind::Text,
            "Other keywords, e.g. platform and mode (Jupyter, graphical user interface).",
        ),
        optional("image", FieldKind::Url, "Header image for the item's profile page."),
        optional(
            "related_catalog_item",
            FieldKind::Record(&RELATED_CATALOG_ITEM),
            "Related catalog items.",
        ),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_profile_declares_all_fields() {
        assert_eq!(BASIC_PROFILE.fields.len(), 23);
        let required: Vec<_> = BASIC_PROFILE.required_fields().collect();
        assert_eq!(required, vec!["name", "description"]);
    }

    #[test]
    fn field_names_are_unique() {
        for decl in [&BASIC_PROFILE, &PERSON, &IDENTIFIER, &RESOURCES, &REFERENCES, &RELATED_CATALOG_ITEM] {
            let mut seen = std::collections::HashSet::new();
            for name in decl.field_names() {
                assert!(seen.insert(name), "{} declares {name} twice", decl.name);
            }
        }
    }

    #[test]
    fn defaults_match_catalog_policy() {
        let default_of = |name| BASIC_PROFILE.field(name).and_then(|f| f.default);
        assert_eq!(default_of("item_type"), Some(DefaultValue::Text("model")));
        assert_eq!(default_of("organization"), Some(DefaultValue::Bool(true)));
        assert_eq!(default_of("license"), Some(DefaultValue::Text("CC0")));
        assert_eq!(default_of("name"), None);
    }

    #[test]
    fn referenced_records_are_listed_once() {
        let names: Vec<_> = BASIC_PROFILE
            .referenced_records()
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec!["Person", "Identifier", "Resources", "References", "RelatedCatalogItem"]
        );
    }

    #[test]
    fn vocabulary_kinds_list_sorted_terms() {
        let Some(field) = BASIC_PROFILE.field("item_type") else {
            panic!("item_type not declared");
        };
        let FieldKind::Vocabulary(terms) = field.kind else {
            panic!("item_type is not a vocabulary field");
        };
        assert_eq!(terms(), vec!["framework", "model", "testbed", "tool"]);
    }

    #[test]
    fn declares_rejects_unknown_keys() {
        assert!(BASIC_PROFILE.declares("image"));
        assert!(!BASIC_PROFILE.declares("related_catalog_items"));
        assert!(RELATED_CATALOG_ITEM.declares("related_catalog_items"));
    }
}
