//! # Vocab Subcommand
//!
//! Lists the controlled vocabularies, their wire spellings and definitions.

use std::io::Write;

use anyhow::Result;
use clap::{Args, ValueEnum};

use mcat_core::{ItemType, TypeKeyword, Vocabulary};

/// Arguments for the vocab subcommand.
#[derive(Args, Debug)]
pub struct VocabArgs {
    /// Vocabulary to list. Lists all when omitted.
    #[arg(value_enum)]
    pub vocabulary: Option<VocabularyName>,
}

/// Selectable vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VocabularyName {
    /// `item_type` terms.
    ItemType,
    /// `type_keywords` terms.
    TypeKeyword,
}

/// Execute the vocab subcommand, writing to stdout.
pub fn run_vocab(args: &VocabArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_vocab_to(args, &mut out)
}

/// Execute the vocab subcommand, writing to `out`.
pub fn run_vocab_to(args: &VocabArgs, out: &mut impl Write) -> Result<u8> {
    match args.vocabulary {
        Some(VocabularyName::ItemType) => list::<ItemType>(out, Some(ItemType::default()))?,
        Some(VocabularyName::TypeKeyword) => list::<TypeKeyword>(out, None)?,
        None => {
            list::<ItemType>(out, Some(ItemType::default()))?;
            writeln!(out)?;
            list::<TypeKeyword>(out, None)?;
        }
    }
    Ok(0)
}

fn list<V: Vocabulary>(out: &mut impl Write, default: Option<V>) -> Result<()> {
    match default {
        Some(term) => writeln!(out, "{} (default: {})", V::FIELD, term.as_str())?,
        None => writeln!(out, "{}", V::FIELD)?,
    }
    let width = V::all().iter().map(|t| t.as_str().len()).max().unwrap_or(0);
    for term in V::all() {
        let definition = term.definition();
        if definition.is_empty() {
            writeln!(out, "  {}", term.as_str())?;
        } else {
            writeln!(out, "  {:<width$}  {definition}", term.as_str())?;
        }
    }
    Ok(())
}
