//! # rankdoc CLI entry point
//!
//! Parses command-line arguments, loads the optional config file, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rankdoc_cli::config::CliConfig;
use rankdoc_cli::document::{run_digest, run_export, run_new, DigestArgs, ExportArgs, NewArgs};
use rankdoc_cli::validate::{run_validate, ValidateArgs};

/// Exit code for operational errors.
const EXIT_ERROR: u8 = 2;

/// rankdoc: eligibility, scoring, and selection documents.
///
/// Validates documents before they reach the ranking engine, creates
/// empty documents, and exports or digests existing ones.
#[derive(Parser, Debug)]
#[command(name = "rankdoc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./rankdoc.yaml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document, a draft, eligibility rules, or the published contract.
    Validate(ValidateArgs),

    /// Write the empty document.
    New(NewArgs),

    /// Import a document and write it as pretty or canonical JSON.
    Export(ExportArgs),

    /// Print the SHA-256 digest of a document's canonical form.
    Digest(DigestArgs),
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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "rankdoc starting");

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match CliConfig::resolve(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::New(args) => run_new(&args),
        Commands::Export(args) => run_export(&args, &config),
        Commands::Digest(args) => run_digest(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
