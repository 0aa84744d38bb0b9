//! # Validate Subcommand
//!
//! Runs one validation pass over a JSON or YAML file and prints the
//! report. By default the full validator runs; `--partial`,
//! `--eligibility`, and `--contract` select the other passes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use rankdoc_schema::{
    parse_eligibility, validate_partial, QueryContract, ValidationReport, Validator,
};

use crate::config::{CliConfig, OutputFormat};

/// Arguments for the `rankdoc validate` subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Document to validate (`.json`, `.yaml`, or `.yml`).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Report only incomplete field references (for drafts).
    #[arg(long, conflicts_with_all = ["eligibility", "contract"])]
    pub partial: bool,

    /// Treat the file as an array of eligibility rules.
    #[arg(long, conflicts_with = "contract")]
    pub eligibility: bool,

    /// Check against the published JSON Schema instead of the validator.
    #[arg(long)]
    pub contract: bool,

    /// Require condition values to match their operator's shape.
    #[arg(long)]
    pub strict: bool,

    /// Require a `default` row in every lookup table.
    #[arg(long)]
    pub require_default: bool,

    /// Reject rules that use both `scoreMethod` and `assignMethod`.
    #[arg(long)]
    pub exclusive_body: bool,

    /// Report format. Defaults to the config's `output`.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 when invalid.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let value = crate::read_value(&args.path)?;

    let report = if args.partial {
        validate_partial(&value)
    } else if args.eligibility {
        match parse_eligibility(&value) {
            Ok(rules) => {
                tracing::debug!(rules = rules.len(), "eligibility rules decoded");
                ValidationReport::default()
            }
            Err(report) => report,
        }
    } else if args.contract {
        let contract = QueryContract::load().context("failed to load the published contract")?;
        ValidationReport::new(contract.check(&value))
    } else {
        let mut options = config.validation_options();
        options.strict_condition_values |= args.strict;
        options.require_default_option |= args.require_default;
        options.exclusive_rule_body |= args.exclusive_body;
        Validator::with_options(options).validate(&value)
    };

    tracing::info!(
        path = %args.path.display(),
        violations = report.len(),
        "validation finished"
    );

    let format = args.format.unwrap_or(config.output);
    println!("{}", render(&args.path, &report, format)?);

    Ok(if report.is_valid() { 0 } else { 1 })
}

/// Render a report in the requested format.
pub fn render(path: &Path, report: &ValidationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("failed to serialize report")
        }
        OutputFormat::Text => {
            let status = if report.is_valid() { "OK" } else { "FAIL" };
            let mut out = format!("{status}: {}", path.display());
            for error in report.errors() {
                out.push_str("\n  ");
                out.push_str(&error);
            }
            Ok(out)
        }
    }
}
