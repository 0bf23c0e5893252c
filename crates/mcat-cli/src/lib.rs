//! # mcat-cli: CLI Tool for the Model Catalog
//!
//! Provides the `mcat` command-line interface over `mcat-schema`.
//!
//! ## Subcommands
//!
//! - `mcat validate`: Validate Basic Profile submissions (JSON or YAML).
//! - `mcat schema`: Export the Basic Profile JSON Schema.
//! - `mcat vocab`: List the controlled vocabularies with definitions.
//!
//! ```bash
//! mcat validate profiles/coawst.yaml
//! mcat --strict-dates validate --format json --emit profiles/*.json
//! mcat schema --out basic_profile.schema.json
//! mcat vocab type-keyword
//! ```
//!
//! Handlers write to any `std::io::Write` and return the process exit code,
//! so they are testable without spawning the binary.

pub mod config;
pub mod schema;
pub mod validate;
pub mod vocab;

/// Catalog schema version, stamped on JSON reports.
pub use mcat_core::SCHEMA_VERSION;
