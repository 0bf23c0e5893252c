//! Opt-in checks layered on top of the base Basic Profile rules.

use serde::{Deserialize, Serialize};

/// Validation switches. All default to off, which gives the permissive
/// catalog behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Reject `organization: false` without `external_organization_name`.
    pub require_external_organization_name: bool,
    /// Reject `release_date` / `last_update` text that does not parse as a
    /// date.
    pub strict_dates: bool,
    /// Report top-level keys the Basic Profile does not declare.
    pub reject_unknown_fields: bool,
}

impl ValidationOptions {
    /// Every opt-in check enabled.
    pub fn strict() -> Self {
        Self {
            require_external_organization_name: true,
            strict_dates: true,
            reject_unknown_fields: true,
        }
    }
}
