//! # Closed Enumerations — Single Source of Truth
//!
//! Every closed value set in the document lives here: condition
//! operators, score operations, sort orders, and the empty-row policy.
//! Each enum is the ONE definition used across the workspace; the
//! validator builds its "must be one of" messages from [`all()`] so the
//! wire vocabulary and the diagnostics cannot drift apart.
//!
//! Wire strings are case-sensitive. The evaluation engine matches them
//! literally, which is why `many2one` and `not equals` keep their
//! irregular spelling.
//!
//! [`all()`]: ScoreOperation::all

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RankdocError;

fn unknown(kind: &'static str, value: &str, expected: &[&'static str]) -> RankdocError {
    RankdocError::UnknownVariant {
        kind,
        value: value.to_string(),
        expected: expected.join(", "),
    }
}

// ── ConditionOperator ───────────────────────────────────────────────

/// Comparison applied by a [`Condition`](crate::Condition) to one candidate field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionOperator {
    /// Field value is one of a list of values.
    #[serde(rename = "in")]
    In,
    /// Field value equals a single value.
    #[serde(rename = "equals")]
    Equals,
    /// Field value differs from a single value.
    #[serde(rename = "not equals")]
    NotEquals,
}

impl ConditionOperator {
    /// All operators in canonical order.
    pub fn all() -> &'static [ConditionOperator] {
        &[Self::In, Self::Equals, Self::NotEquals]
    }

    /// Wire identifiers in canonical order.
    pub fn names() -> &'static [&'static str] {
        &["in", "equals", "not equals"]
    }

    /// The wire identifier for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Equals => "equals",
            Self::NotEquals => "not equals",
        }
    }

    /// Whether the operator conventionally compares against a list.
    pub fn expects_list(&self) -> bool {
        matches!(self, Self::In)
    }
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionOperator {
    type Err = RankdocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "equals" => Ok(Self::Equals),
            "not equals" => Ok(Self::NotEquals),
            other => Err(unknown("ConditionOperator", other, Self::names())),
        }
    }
}

// ── ScoreOperation ──────────────────────────────────────────────────

/// Numeric transformation applied by a [`ScoreMethod`](crate::ScoreMethod).
///
/// | Operation | Meaning of `value` |
/// |---|---|
/// | `Percentile` | `"Inverse"` ranks from the bottom, `"None"` ranks from the top, a number is carried through |
/// | `Multiplication` | scaling factor |
/// | `Addition` | additive constant |
/// | `many2one` | name of the method combining several contributions into one |
/// | `Inverse` | conventionally the literal `"Inverse"` |
/// | `None` | ignored; the contribution passes through unscored |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreOperation {
    /// Percentile rank of the retrieved value within the cohort.
    Percentile,
    /// Multiply by a constant factor.
    Multiplication,
    /// Add a constant.
    Addition,
    /// Collapse several contributions into one.
    #[serde(rename = "many2one")]
    Many2One,
    /// Invert the retrieved value.
    Inverse,
    /// Pass the contribution through unchanged.
    None,
}

impl ScoreOperation {
    /// All operations in canonical order.
    pub fn all() -> &'static [ScoreOperation] {
        &[
            Self::Percentile,
            Self::Multiplication,
            Self::Addition,
            Self::Many2One,
            Self::Inverse,
            Self::None,
        ]
    }

    /// Wire identifiers in canonical order.
    pub fn names() -> &'static [&'static str] {
        &[
            "Percentile",
            "Multiplication",
            "Addition",
            "many2one",
            "Inverse",
            "None",
        ]
    }

    /// The wire identifier for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentile => "Percentile",
            Self::Multiplication => "Multiplication",
            Self::Addition => "Addition",
            Self::Many2One => "many2one",
            Self::Inverse => "Inverse",
            Self::None => "None",
        }
    }
}

impl std::fmt::Display for ScoreOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreOperation {
    type Err = RankdocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Percentile" => Ok(Self::Percentile),
            "Multiplication" => Ok(Self::Multiplication),
            "Addition" => Ok(Self::Addition),
            "many2one" => Ok(Self::Many2One),
            "Inverse" => Ok(Self::Inverse),
            "None" => Ok(Self::None),
            other => Err(unknown("ScoreOperation", other, Self::names())),
        }
    }
}

// ── SortOrder ───────────────────────────────────────────────────────

/// Direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Both orders in canonical order.
    pub fn all() -> &'static [SortOrder] {
        &[Self::Ascending, Self::Descending]
    }

    /// Wire identifiers in canonical order.
    pub fn names() -> &'static [&'static str] {
        &["Ascending", "Descending"]
    }

    /// The wire identifier for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }

    /// The opposite direction.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = RankdocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ascending" => Ok(Self::Ascending),
            "Descending" => Ok(Self::Descending),
            other => Err(unknown("SortOrder", other, Self::names())),
        }
    }
}

// ── DropEmptyRow ────────────────────────────────────────────────────

/// What a score method does with candidates whose retrieved data is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropEmptyRow {
    /// Drop the candidate when any retrieved field is empty.
    All,
    /// Keep every candidate.
    None,
}

impl DropEmptyRow {
    /// Both policies in canonical order.
    pub fn all() -> &'static [DropEmptyRow] {
        &[Self::All, Self::None]
    }

    /// Wire identifiers in canonical order.
    pub fn names() -> &'static [&'static str] {
        &["all", "none"]
    }

    /// The wire identifier for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for DropEmptyRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DropEmptyRow {
    type Err = RankdocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "none" => Ok(Self::None),
            other => Err(unknown("DropEmptyRow", other, Self::names())),
        }
    }
}
