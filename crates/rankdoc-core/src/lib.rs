//! # rankdoc-core — Document Model for Eligibility, Scoring, and Selection
//!
//! This crate is the leaf of the workspace. It defines the typed form of
//! the document an operator assembles to describe who is eligible for a
//! program, how eligible candidates are scored, and how the final
//! selection is ordered. Every other crate depends on it; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One enum per closed vocabulary.** Condition operators, score
//!    operations, sort orders, and empty-row policies are each defined
//!    once in [`operator`], with `all()`, `as_str()`, and `FromStr`.
//!
//! 2. **Sum types for polymorphic fields.** `Condition.value`,
//!    `ScoreMethod.value`, and `AssignMethod.option` are enums, so every
//!    consumer matches their shapes exhaustively.
//!
//! 3. **Exclusive rule bodies.** A [`Rule`] is scored by formulas *or* by
//!    a lookup table, encoded as [`RuleBody`], not as two optional lists.
//!
//! 4. **Untrusted input stops at the boundary.** Raw `serde_json::Value`
//!    enters only through [`Document::from_value`] (shape coercion) and
//!    the validator in `rankdoc-schema` (diagnostics).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rankdoc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod document;
pub mod eligibility;
pub mod error;
pub mod operator;
pub mod value;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest, DigestAlgorithm};
pub use document::{
    AssignMethod, Condition, DataBlock, Document, FieldRef, Quantity, Rule, RuleBody, ScoreMethod,
    Selection, SortMethod,
};
pub use eligibility::{EligibilityOperator, EligibilityRule, EligibilityValue};
pub use error::{CanonicalizationError, RankdocError, RuleBodyError};
pub use operator::{ConditionOperator, DropEmptyRow, ScoreOperation, SortOrder};
pub use value::{AssignOption, ConditionValue, Scalar, ScoreValue, DEFAULT_OPTION, EMPTY_OPTION};

/// Alias matching the name the evaluation engine uses for the document.
pub type QueryBuilderSchema = Document;
