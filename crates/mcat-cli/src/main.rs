//! # mcat CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mcat_cli::config::{resolve_options, OptionFlags};
use mcat_cli::schema::{run_schema, SchemaArgs};
use mcat_cli::validate::{run_validate, ValidateArgs};
use mcat_cli::vocab::{run_vocab, VocabArgs};

/// Model catalog CLI.
///
/// Validates Basic Profile submissions, exports the profile's JSON Schema,
/// and lists the controlled vocabularies.
#[derive(Parser, Debug)]
#[command(name = "mcat", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Validation options file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    flags: OptionFlags,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate Basic Profile submissions.
    Validate(ValidateArgs),

    /// Export the Basic Profile JSON Schema.
    Schema(SchemaArgs),

    /// List the controlled vocabularies.
    Vocab(VocabArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(schema_version = mcat_cli::SCHEMA_VERSION, "mcat starting");

    let result = match cli.command {
        Commands::Validate(args) => resolve_options(cli.config.as_deref(), &cli.flags)
            .and_then(|options| run_validate(&args, options)),
        Commands::Schema(args) => run_schema(&args),
        Commands::Vocab(args) => run_vocab(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
