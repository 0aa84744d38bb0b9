//! # rankdoc-cli — Command-Line Interface
//!
//! Provides the `rankdoc` binary for working with documents outside an
//! editing surface, e.g. in CI before a document is handed to the
//! ranking engine.
//!
//! ## Subcommands
//!
//! - `rankdoc validate`: full, partial, eligibility, or contract validation.
//! - `rankdoc new`: write the empty document.
//! - `rankdoc export`: import through the store and write pretty or canonical JSON.
//! - `rankdoc digest`: print the content digest of a document.
//!
//! ```bash
//! rankdoc validate query.json --strict --format json
//! rankdoc export query.yaml --canonical --out query.json
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` the document failed validation, `2` operational
//! error (unreadable file, unparseable input, bad config).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers return exit codes.
//! - Handlers delegate to the library crates. No validation logic here.

pub mod config;
pub mod document;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read a JSON or YAML file (by extension `.yaml` / `.yml`) as a JSON value.
pub fn read_value(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(&text).with_context(|| format!("failed to parse YAML: {}", path.display()))
    } else {
        serde_json::from_str(&text).with_context(|| format!("failed to parse JSON: {}", path.display()))
    }
}

/// Write `text` to `out`, or to stdout when no path is given.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write file: {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote document");
        }
        None => println!("{text}"),
    }
    Ok(())
}
