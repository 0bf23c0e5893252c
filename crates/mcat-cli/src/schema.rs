//! # Schema Subcommand
//!
//! Exports the Basic Profile as a Draft 2020-12 JSON Schema, to stdout or a
//! file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mcat_schema::basic_profile_json_schema;

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Write the schema to this file instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    let text = serde_json::to_string_pretty(&basic_profile_json_schema())
        .context("failed to serialize JSON Schema")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write schema: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote JSON Schema");
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{text}")?;
        }
    }
    Ok(0)
}
