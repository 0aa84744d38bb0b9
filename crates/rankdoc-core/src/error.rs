//! # Error Types
//!
//! Failures raised by the typed model layer. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! Validation findings are *not* errors: the validator reports them as
//! data (see `rankdoc-schema`). The variants here cover the places where
//! a raw value cannot be turned into a typed document at all.

use thiserror::Error;

/// Top-level error type for the rankdoc model layer.
#[derive(Error, Debug)]
pub enum RankdocError {
    /// A string did not name any variant of a closed enumeration.
    #[error("unknown {kind} {value:?}; expected one of: {expected}")]
    UnknownVariant {
        /// Enumeration name (e.g. `ScoreOperation`).
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Comma-separated list of legal wire values.
        expected: String,
    },

    /// A rule carried both a non-empty `scoreMethod` and a non-empty
    /// `assignMethod` list.
    #[error("rule body is ambiguous: {0}")]
    AmbiguousRuleBody(#[from] RuleBodyError),

    /// The raw value could not be coerced into the typed model.
    #[error("document shape error: {0}")]
    Shape(String),

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raised while decoding a rule whose scoring body is not exclusive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("rule defines {score_methods} scoreMethod and {assign_methods} assignMethod entries; only one list may be populated")]
pub struct RuleBodyError {
    /// Number of `scoreMethod` entries found.
    pub score_methods: usize,
    /// Number of `assignMethod` entries found.
    pub assign_methods: usize,
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
