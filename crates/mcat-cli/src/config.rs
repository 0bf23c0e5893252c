//! # Validation Configuration
//!
//! Resolves the [`ValidationOptions`] a run uses: an optional YAML or JSON
//! config file, with command-line flags OR-ed on top. A flag can switch a
//! check on but never off.
//!
//! ```yaml
//! # mcat.yaml
//! strict_dates: true
//! require_external_organization_name: false
//! reject_unknown_fields: true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use mcat_schema::{load_document, ValidationOptions};

/// Command-line switches for the opt-in validation checks.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionFlags {
    /// Require release_date / last_update to be recognizable dates.
    #[arg(long, global = true)]
    pub strict_dates: bool,

    /// Require external_organization_name when organization is false.
    #[arg(long = "require-external-org-name", global = true)]
    pub require_external_organization_name: bool,

    /// Report undeclared top-level keys as errors.
    #[arg(long, global = true)]
    pub reject_unknown_fields: bool,
}

impl OptionFlags {
    /// Enable every check set on the command line.
    pub fn apply(&self, options: &mut ValidationOptions) {
        options.strict_dates |= self.strict_dates;
        options.require_external_organization_name |= self.require_external_organization_name;
        options.reject_unknown_fields |= self.reject_unknown_fields;
    }
}

/// Read validation options from a YAML or JSON file.
///
/// # Errors
///
/// Fails if the file cannot be loaded or is not a valid options mapping.
pub fn load_options_file(path: &Path) -> Result<ValidationOptions> {
    let value = load_document(path)
        .with_context(|| format!("failed to load config file {}", path.display()))?;
    serde_json::from_value(value)
        .with_context(|| format!("invalid validation options in {}", path.display()))
}

/// The options for this run: the config file (if any) overridden by flags.
///
/// # Errors
///
/// Propagates config file errors.
pub fn resolve_options(config: Option<&Path>, flags: &OptionFlags) -> Result<ValidationOptions> {
    let mut options = match config {
        Some(path) => load_options_file(path)?,
        None => ValidationOptions::default(),
    };
    flags.apply(&mut options);
    tracing::debug!(?options, "resolved validation options");
    Ok(options)
}
