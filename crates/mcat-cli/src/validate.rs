//! # Validate Subcommand
//!
//! Validates Basic Profile submissions. Each path is loaded as JSON or YAML;
//! a top-level array is a batch and each element is validated on its own.
//!
//! Exit status is 0 when every record is valid, 1 otherwise. A file that
//! cannot be loaded counts as invalid and does not stop the run.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use mcat_schema::{
    cross_check, load_document, split_batch, JsonSchemaViolation, ProfileValidator,
    ValidationOptions, ViolationRecord,
};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Submission files (.json, .yaml, .yml).
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Include the canonical JSON of each valid record in the output.
    #[arg(long)]
    pub emit: bool,

    /// Also check each record against the exported JSON Schema.
    #[arg(long)]
    pub cross_check: bool,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per record, violations indented below.
    Text,
    /// A JSON document with one entry per record.
    Json,
}

/// Outcome for one record.
#[derive(Debug, Serialize)]
pub struct RecordReport {
    /// File path, with `#<index>` appended for batch elements.
    pub source: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ViolationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema_violations: Option<Vec<JsonSchemaViolation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Value>,
}

#[derive(Serialize)]
struct Summary<'a> {
    schema_version: &'a str,
    total: usize,
    valid: usize,
    invalid: usize,
    records: &'a [RecordReport],
}

/// Execute the validate subcommand, writing the report to stdout.
pub fn run_validate(args: &ValidateArgs, options: ValidationOptions) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validate_to(args, options, &mut out)
}

/// Execute the validate subcommand, writing the report to `out`.
pub fn run_validate_to(
    args: &ValidateArgs,
    options: ValidationOptions,
    out: &mut impl Write,
) -> Result<u8> {
    let validator = ProfileValidator::new(options);
    let mut reports = Vec::new();
    for path in &args.paths {
        reports.extend(validate_path(&validator, path, args)?);
    }

    let invalid = reports.iter().filter(|r| !r.valid).count();
    tracing::info!(total = reports.len(), invalid, "validation finished");

    match args.format {
        OutputFormat::Text => write_text(out, &reports)?,
        OutputFormat::Json => {
            let summary = Summary {
                schema_version: crate::SCHEMA_VERSION,
                total: reports.len(),
                valid: reports.len() - invalid,
                invalid,
                records: &reports,
            };
            serde_json::to_writer_pretty(&mut *out, &summary)
                .context("failed to write JSON report")?;
            writeln!(out)?;
        }
    }

    Ok(if invalid == 0 { 0 } else { 1 })
}

fn validate_path(
    validator: &ProfileValidator,
    path: &Path,
    args: &ValidateArgs,
) -> Result<Vec<RecordReport>> {
    let document = match load_document(path) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(path = %path.display(), "{e}");
            return Ok(vec![load_failure(path, e.reason)]);
        }
    };

    let is_batch = document.is_array();
    let records = split_batch(document);
    if records.is_empty() {
        tracing::warn!(path = %path.display(), "document contains no records");
        return Ok(vec![load_failure(path, "document contains no records".to_string())]);
    }
    records
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let source = if is_batch {
                format!("{}#{idx}", path.display())
            } else {
                path.display().to_string()
            };
            validate_record(validator, source, raw, args)
        })
        .collect()
}

fn load_failure(path: &Path, reason: String) -> RecordReport {
    RecordReport {
        source: path.display().to_string(),
        valid: false,
        name: None,
        violations: Vec::new(),
        load_error: Some(reason),
        json_schema_violations: None,
        record: None,
    }
}

fn validate_record(
    validator: &ProfileValidator,
    source: String,
    raw: &Value,
    args: &ValidateArgs,
) -> Result<RecordReport> {
    let json_schema_violations = if args.cross_check {
        Some(cross_check(raw).context("failed to run JSON Schema cross-check")?)
    } else {
        None
    };

    let report = match validator.validate(raw) {
        Ok(profile) => RecordReport {
            source,
            valid: true,
            name: Some(profile.name().to_string()),
            violations: Vec::new(),
            load_error: None,
            json_schema_violations,
            record: if args.emit {
                Some(profile.to_value().context("failed to serialize record")?)
            } else {
                None
            },
        },
        Err(errors) => RecordReport {
            source,
            valid: false,
            name: raw.get("name").and_then(Value::as_str).map(str::to_string),
            violations: errors.to_records(),
            load_error: None,
            json_schema_violations,
            record: None,
        },
    };

    if let Some(schema_violations) = &report.json_schema_violations {
        if schema_violations.is_empty() != report.valid {
            tracing::warn!(
                source = %report.source,
                "validator and exported JSON Schema disagree on this record"
            );
        }
    }
    Ok(report)
}

fn write_text(out: &mut impl Write, reports: &[RecordReport]) -> Result<()> {
    for report in reports {
        let label = report.name.as_deref().unwrap_or("(unnamed)");
        if report.valid {
            writeln!(out, "OK       {}  {label}", report.source)?;
        } else {
            writeln!(out, "INVALID  {}  {label}", report.source)?;
        }
        if let Some(reason) = &report.load_error {
            writeln!(out, "    load error: {reason}")?;
        }
        for v in &report.violations {
            let path = if v.field_path.is_empty() { "(root)" } else { &v.field_path };
            writeln!(out, "    {path}: [{}] {}", v.error_kind, v.message)?;
        }
        if let Some(schema_violations) = &report.json_schema_violations {
            for v in schema_violations {
                let pointer = if v.instance_path.is_empty() { "(root)" } else { &v.instance_path };
                writeln!(out, "    json-schema {pointer}: {}", v.message)?;
            }
        }
        if let Some(record) = &report.record {
            writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
        }
    }
    let invalid = reports.iter().filter(|r| !r.valid).count();
    writeln!(
        out,
        "{} record(s), {} valid, {invalid} invalid",
        reports.len(),
        reports.len() - invalid
    )?;
    Ok(())
}
