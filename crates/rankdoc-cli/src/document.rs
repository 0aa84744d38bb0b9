//! # Document Subcommands
//!
//! `new`, `export`, and `digest`. Each one that reads a document imports
//! it through a [`DocumentStore`], so a file the store would reject is
//! rejected here too.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use rankdoc_core::Document;
use rankdoc_schema::Validator;
use rankdoc_store::DocumentStore;

use crate::config::CliConfig;

/// Arguments for `rankdoc new`.
#[derive(Args, Debug, Default)]
pub struct NewArgs {
    /// Write to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Arguments for `rankdoc export`.
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Document to export (`.json`, `.yaml`, or `.yml`).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Write to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Emit canonical (JCS) JSON instead of pretty-printed JSON.
    #[arg(long)]
    pub canonical: bool,

    /// Export even if the document fails validation.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `rankdoc digest`.
#[derive(Args, Debug, Default)]
pub struct DigestArgs {
    /// Document to digest (`.json`, `.yaml`, or `.yml`).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Write the empty document.
pub fn run_new(args: &NewArgs) -> Result<u8> {
    let text = Document::empty()
        .to_json_pretty()
        .context("failed to serialize the empty document")?;
    crate::write_output(args.out.as_deref(), &text)?;
    Ok(0)
}

/// Import a document and write it back out.
///
/// Returns exit code 1 without writing anything when the document is
/// invalid and neither `--force` nor `allow_invalid_export` is set.
pub fn run_export(args: &ExportArgs, config: &CliConfig) -> Result<u8> {
    let validator = Validator::with_options(config.validation_options());
    let store = load_store(&args.path, DocumentStore::with_validator(validator))?;

    let report = store.validate();
    if !report.is_valid() {
        if args.force || config.allow_invalid_export {
            tracing::warn!(
                path = %args.path.display(),
                violations = report.len(),
                "exporting invalid document"
            );
        } else {
            println!("FAIL: {}", args.path.display());
            for error in report.errors() {
                println!("  {error}");
            }
            return Ok(1);
        }
    }

    let text = if args.canonical {
        store.export_canonical()?
    } else {
        store.export_json()?
    };
    crate::write_output(args.out.as_deref(), &text)?;
    Ok(0)
}

/// Print the content digest of a document.
pub fn run_digest(args: &DigestArgs) -> Result<u8> {
    let store = load_store(&args.path, DocumentStore::new())?;
    println!("{}", store.digest()?);
    Ok(0)
}

fn load_store(path: &Path, mut store: DocumentStore) -> Result<DocumentStore> {
    let value = crate::read_value(path)?;
    store
        .try_import(&value)
        .with_context(|| format!("failed to import document: {}", path.display()))?;
    Ok(store)
}
