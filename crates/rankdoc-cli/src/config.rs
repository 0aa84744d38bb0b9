//! # CLI Configuration
//!
//! Optional YAML file with defaults for the subcommands. Looked up at the
//! `--config` path when given, otherwise at `rankdoc.yaml` in the working
//! directory. Every key is optional; command-line flags override it.
//!
//! ```yaml
//! output: json
//! strict_condition_values: true
//! require_default_option: false
//! exclusive_rule_body: false
//! allow_invalid_export: false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rankdoc_schema::ValidationOptions;

/// File name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rankdoc.yaml";

/// Report format for `rankdoc validate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `OK:` / `FAIL:` line followed by indented errors.
    #[default]
    Text,
    /// The serialized validation report.
    Json,
}

/// Settings loaded from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Default report format.
    pub output: OutputFormat,
    /// Enable the condition value / operator shape check.
    pub strict_condition_values: bool,
    /// Require a `default` row in every lookup table.
    pub require_default_option: bool,
    /// Reject rules that carry both a formula list and a lookup table.
    pub exclusive_rule_body: bool,
    /// Let `export` write documents that fail validation.
    pub allow_invalid_export: bool,
}

impl CliConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load the explicit config, or the default file in `cwd` when it
    /// exists, or fall back to defaults.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config from working directory");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Validator options implied by this config.
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            strict_condition_values: self.strict_condition_values,
            require_default_option: self.require_default_option,
            exclusive_rule_body: self.exclusive_rule_body,
        }
    }
}
