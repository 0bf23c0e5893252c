//! # mcat-schema: Catalog Record Validation
//!
//! Turns an untyped submission (a parsed JSON or YAML object) into a
//! strongly-typed [`BasicProfile`], or into a complete, field-addressed
//! report of everything wrong with it.
//!
//! ## Record Validator (`profile`)
//!
//! [`validate`] and [`ProfileValidator::validate`] check every declared
//! field, apply defaults (`item_type` → `model`, `organization` → `true`,
//! `license` → `CC0`), and accumulate violations instead of stopping at the
//! first. A record is returned only when nothing was rejected.
//!
//! ## Sub-Records
//!
//! [`Person`], [`Identifier`], [`Resources`], [`References`] and
//! [`RelatedCatalogItem`] are independent leaf schemas implementing
//! [`SubRecord`]. Their violations bubble up prefixed with the containing
//! field path (`author[2].email`) and wrapped as
//! `NestedValidationFailure`.
//!
//! ## Declarations, Canonical Form and JSON Schema
//!
//! Every record's fields are also declared as data in [`declaration`]. The
//! tables drive [`canonicalize`] (the expected serialized form of a valid
//! submission) and [`json_schema::basic_profile_json_schema`].
//!
//! ## Crate Policy
//!
//! - Depends only on `mcat-core` internally.
//! - Validation is a pure function of its input: no I/O, no shared state.
//!   Only [`document`] touches the filesystem.
//! - No `.unwrap()` outside tests.

pub mod canonical;
pub mod declaration;
pub mod document;
pub mod error;
pub mod identifier;
pub mod json_schema;
pub mod options;
pub mod person;
pub mod profile;
mod reader;
pub mod record;
pub mod references;
pub mod related;
pub mod resources;
pub mod violation;

pub use canonical::{canonicalize, canonicalize_record};
pub use declaration::{DefaultValue, FieldDecl, FieldKind, RecordDecl};
pub use document::{load_document, parse_document, split_batch, DocumentError, DocumentFormat};
pub use error::SchemaError;
pub use identifier::Identifier;
pub use json_schema::{basic_profile_json_schema, cross_check, JsonSchemaViolation};
pub use options::ValidationOptions;
pub use person::Person;
pub use profile::{validate, BasicProfile, ProfileValidator};
pub use record::SubRecord;
pub use references::References;
pub use related::RelatedCatalogItem;
pub use resources::Resources;
pub use violation::{ValidationErrorSet, Violation, ViolationRecord};
