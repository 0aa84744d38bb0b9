//! # Operation and Operator Semantic Tables
//!
//! The one place where legality depends on more than a static type: the
//! set of acceptable `ScoreMethod.value`s depends on the `operation`, and
//! a condition's value shape conventionally depends on its `operator`.
//!
//! | operation | legal `value` |
//! |---|---|
//! | `Percentile` | `"Inverse"`, `"None"`, or a number |
//! | `Multiplication` | a number |
//! | `Addition` | a number |
//! | `many2one` | a non-empty string naming the combination method |
//! | `Inverse` | anything (conventionally `"Inverse"`) |
//! | `None` | anything (ignored; conventionally `"None"`) |
//!
//! Assign-method sentinels (`"default"`, `"isEmpty"`) are ordinary
//! strings here. Only the opt-in check in [`has_default_option`] gives
//! `"default"` any meaning.

use serde_json::Value;

use rankdoc_core::{ConditionOperator, ScoreOperation, DEFAULT_OPTION};

/// Percentile keyword: rank from the bottom.
pub const PERCENTILE_INVERSE: &str = "Inverse";

/// Percentile keyword: rank from the top.
pub const PERCENTILE_NONE: &str = "None";

/// The values a score operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDomain {
    /// `"Inverse"`, `"None"`, or a number.
    PercentileRank,
    /// A number.
    Numeric,
    /// A non-empty string naming a combination method.
    MethodName,
    /// Anything; the value is conventional only.
    Unconstrained,
}

impl ValueDomain {
    /// Whether `value` lies in this domain.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Self::PercentileRank => match value {
                Value::Number(_) => true,
                Value::String(s) => s == PERCENTILE_INVERSE || s == PERCENTILE_NONE,
                _ => false,
            },
            Self::Numeric => value.is_number(),
            Self::MethodName => value.as_str().is_some_and(|s| !s.is_empty()),
            Self::Unconstrained => true,
        }
    }
}

/// The value domain of a score operation.
pub fn value_domain(operation: ScoreOperation) -> ValueDomain {
    match operation {
        ScoreOperation::Percentile => ValueDomain::PercentileRank,
        ScoreOperation::Multiplication | ScoreOperation::Addition => ValueDomain::Numeric,
        ScoreOperation::Many2One => ValueDomain::MethodName,
        ScoreOperation::Inverse | ScoreOperation::None => ValueDomain::Unconstrained,
    }
}

/// The violation message (after the `.value` path) for a value outside
/// `operation`'s domain, or `None` when the value is admitted.
pub fn score_value_violation(operation: ScoreOperation, value: &Value) -> Option<String> {
    let domain = value_domain(operation);
    if domain.admits(value) {
        return None;
    }
    let expectation = match domain {
        ValueDomain::PercentileRank => "must be 'Inverse', 'None' or a number",
        ValueDomain::Numeric => "must be a number",
        ValueDomain::MethodName => "must name a combination method",
        ValueDomain::Unconstrained => return None,
    };
    Some(format!("{expectation} when operation is {operation}"))
}

/// The violation message (after the `.value` path) for a condition value
/// whose shape does not fit its operator, or `None` when it fits.
pub fn condition_value_violation(operator: ConditionOperator, value: &Value) -> Option<String> {
    match (operator.expects_list(), value.is_array()) {
        (true, false) => Some(format!("must be an array when operator is '{operator}'")),
        (false, true) => Some(format!("must be a single value when operator is '{operator}'")),
        _ => None,
    }
}

/// Whether an `assignMethod` array carries the `"default"` fallback row.
///
/// Rows whose `option` is malformed are skipped; they are reported
/// separately.
pub fn has_default_option(assign_methods: &[Value]) -> bool {
    assign_methods.iter().any(|row| match row.get("option") {
        Some(Value::String(s)) => s == DEFAULT_OPTION,
        Some(Value::Array(items)) => items.iter().any(|i| i.as_str() == Some(DEFAULT_OPTION)),
        _ => false,
    })
}
