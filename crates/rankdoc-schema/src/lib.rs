//! # rankdoc-schema — Document Validation
//!
//! Checks untrusted JSON against the document model of `rankdoc-core`
//! and reports every violation with the path of the offending node.
//!
//! ## Validation Passes
//!
//! - [`validate_query`] / [`Validator`]: full structural and semantic
//!   validation. Non-short-circuiting: one call reports every problem.
//! - [`validate_partial`]: relaxed pass for drafts; reports only
//!   incomplete field references.
//! - [`validate_eligibility`]: the flat eligibility dialect.
//! - [`QueryContract`]: the published JSON Schema, for engines that
//!   consume documents without linking this crate.
//!
//! The operation-dependent value rules live in [`semantics`].
//!
//! ## Crate Policy
//!
//! - Depends only on `rankdoc-core` internally.
//! - Validation never panics and never returns `Err`. Problems are
//!   reported in a [`ValidationReport`].
//! - Violation messages are part of the public contract. The editing
//!   surface displays them verbatim.

pub mod contract;
pub mod eligibility;
pub mod partial;
pub mod report;
pub mod semantics;
pub mod validate;

pub use contract::{ContractError, QueryContract, CONTRACT_SCHEMA_NAME};
pub use eligibility::{parse_eligibility, validate_eligibility};
pub use partial::validate_partial;
pub use report::{NodePath, ValidationReport, Violation, ViolationKind};
pub use semantics::{value_domain, ValueDomain};
pub use validate::{validate_document, validate_query, ValidationOptions, Validator};
