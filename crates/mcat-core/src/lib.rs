//! # mcat-core: Foundational Types for the Model Catalog Schema
//!
//! This crate is the leaf of the workspace. It defines the primitives that
//! every catalog record is built from; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed vocabularies are enums.** `ItemType` and `TypeKeyword` are
//!    fixed sets of named variants with a validated constructor. No open
//!    text where the catalog expects a controlled term.
//!
//! 2. **Case-sensitive exact match.** Vocabulary wire values such as
//!    `"Physics-based"` are matched byte-for-byte. `"stochastic"` is not
//!    `"Stochastic"`.
//!
//! 3. **Structured errors.** Every rejected field carries a `FieldError`
//!    that maps onto one stable `ErrorKind`, so callers can render form
//!    errors without parsing messages.
//!
//! 4. **Byte-stable round-trips.** `HttpUrl` keeps the submitted text and
//!    `CanonicalBytes` is the only comparison path for serialized records.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mcat-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod date;
pub mod error;
pub mod http_url;
pub mod path;
pub mod vocabulary;

pub use canonical::CanonicalBytes;
pub use date::parse_date_like;
pub use error::{CanonicalizationError, ErrorKind, FieldError, VocabularyError};
pub use http_url::HttpUrl;
pub use path::{FieldPath, PathSegment};
pub use vocabulary::{ItemType, TypeKeyword, Vocabulary};

/// Version of the Basic Profile schema implemented by this workspace.
///
/// A property of the schema, not of individual records.
pub const SCHEMA_VERSION: &str = "v1.0.0";

/// License applied when a record does not name one.
pub const DEFAULT_LICENSE: &str = "CC0";
