//! # Published JSON Schema Contract
//!
//! The document shape is also published as a JSON Schema (Draft 2020-12)
//! for engines that consume documents without linking this crate. The
//! schema is bundled at compile time from
//! `schemas/query-builder.schema.json` and compiled once with the
//! `jsonschema` crate.
//!
//! The contract is coarser than [`crate::validate`]: it checks types,
//! required keys, and closed vocabularies, but not the operation-dependent
//! value domains or the exclusive rule body. Where the two disagree the
//! validator is authoritative.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::report::{Violation, ViolationKind};

/// File name of the bundled contract.
pub const CONTRACT_SCHEMA_NAME: &str = "query-builder.schema.json";

const CONTRACT_SCHEMA: &str = include_str!("../schemas/query-builder.schema.json");

/// Error loading the bundled contract.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The bundled schema text is not valid JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoad {
        /// Schema file name.
        schema_name: String,
        /// Reason the schema could not be parsed.
        reason: String,
    },

    /// The schema parsed but could not be compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild {
        /// Schema file name.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// The compiled document contract.
///
/// Immutable after construction and `Send + Sync`.
pub struct QueryContract {
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for QueryContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryContract")
            .field("schema", &CONTRACT_SCHEMA_NAME)
            .finish_non_exhaustive()
    }
}

impl QueryContract {
    /// Parse and compile the bundled schema.
    pub fn load() -> Result<Self, ContractError> {
        let schema: Value =
            serde_json::from_str(CONTRACT_SCHEMA).map_err(|e| ContractError::SchemaLoad {
                schema_name: CONTRACT_SCHEMA_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| ContractError::ValidatorBuild {
                schema_name: CONTRACT_SCHEMA_NAME.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { schema, validator })
    }

    /// The raw schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Check `instance` against the contract. All violations are
    /// classified as [`ViolationKind::Shape`].
    pub fn check(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                path: node_path(&e.instance_path.to_string()),
                kind: ViolationKind::Shape,
                message: e.to_string(),
            })
            .collect()
    }

    /// Whether `instance` satisfies the contract.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

/// Render a JSON pointer (`/rules/0/Data/1`) in validator path notation
/// (`Rule[0].Data[1]`). The empty pointer is the document itself.
fn node_path(pointer: &str) -> String {
    let mut path = String::new();
    for (n, raw) in pointer.split('/').skip(1).enumerate() {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        match segment.parse::<usize>() {
            Ok(i) if n == 1 && path == "rules" => path = format!("Rule[{i}]"),
            Ok(i) => path.push_str(&format!("[{i}]")),
            Err(_) if path.is_empty() => path = segment,
            Err(_) => {
                path.push('.');
                path.push_str(&segment);
            }
        }
    }
    if path.is_empty() {
        "Query".to_string()
    } else {
        path
    }
}
