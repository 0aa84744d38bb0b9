//! # Eligibility Dialect
//!
//! A flat rule format that predates the nested document model. Each
//! rule tests one field with one of six operators. Its operator
//! vocabulary (`not_in`, `between`, ...) is incompatible with
//! [`ConditionOperator`](crate::ConditionOperator) and the two are
//! deliberately kept apart: there is no conversion between an
//! [`EligibilityRule`] and a [`Condition`](crate::Condition).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RankdocError;
use crate::value::Scalar;

/// Operator of an [`EligibilityRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityOperator {
    /// Field value is one of a list.
    In,
    /// Field value lies within `[min, max]`.
    Between,
    /// Field value equals a scalar.
    Equals,
    /// Field value is greater than a number.
    GreaterThan,
    /// Field value is less than a number.
    LessThan,
    /// Field value is none of a list.
    NotIn,
}

impl EligibilityOperator {
    /// All operators in canonical order.
    pub fn all() -> &'static [EligibilityOperator] {
        &[
            Self::In,
            Self::Between,
            Self::Equals,
            Self::GreaterThan,
            Self::LessThan,
            Self::NotIn,
        ]
    }

    /// Wire identifiers in canonical order.
    pub fn names() -> &'static [&'static str] {
        &["in", "between", "equals", "greater_than", "less_than", "not_in"]
    }

    /// The wire identifier for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Between => "between",
            Self::Equals => "equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::NotIn => "not_in",
        }
    }
}

impl std::fmt::Display for EligibilityOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EligibilityOperator {
    type Err = RankdocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| RankdocError::UnknownVariant {
                kind: "EligibilityOperator",
                value: s.to_string(),
                expected: Self::names().join(", "),
            })
    }
}

/// Right-hand side of an [`EligibilityRule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EligibilityValue {
    /// A list (for `in`, `not_in`, and `between` bounds).
    List(Vec<Scalar>),
    /// A single value.
    One(Scalar),
}

/// One flat eligibility test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRule {
    /// Identifier of the candidate attribute.
    pub field_key: String,
    /// Intake step the attribute belongs to.
    pub step_name: String,
    /// Comparison to apply.
    pub operator: EligibilityOperator,
    /// Right-hand side.
    pub value: EligibilityValue,
}

impl EligibilityValue {
    /// The pair `[min, max]`, when this is a two-element list of numbers.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            Self::List(items) => match items.as_slice() {
                [min, max] => Some((min.as_f64()?, max.as_f64()?)),
                _ => None,
            },
            Self::One(_) => None,
        }
    }

    /// The single value, if this is not a list.
    pub fn as_one(&self) -> Option<&Scalar> {
        match self {
            Self::One(value) => Some(value),
            Self::List(_) => None,
        }
    }
}

impl EligibilityRule {
    /// The `[min, max]` bounds of a `between` rule, when both are numbers.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.operator {
            EligibilityOperator::Between => self.value.bounds(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_roundtrip() {
        for op in EligibilityOperator::all() {
            assert_eq!(op.as_str().parse::<EligibilityOperator>().unwrap(), *op);
            assert_eq!(serde_json::to_value(op).unwrap(), json!(op.as_str()));
        }
        assert!("not equals".parse::<EligibilityOperator>().is_err());
    }

    #[test]
    fn test_between_bounds() {
        let rule: EligibilityRule = serde_json::from_value(json!({
            "field_key": "age", "step_name": "personal info step",
            "operator": "between", "value": [18, 25]
        }))
        .unwrap();
        assert_eq!(rule.bounds(), Some((18.0, 25.0)));
    }

    #[test]
    fn test_value_shapes() {
        let pair: EligibilityValue = serde_json::from_value(json!([1.5, 3])).unwrap();
        assert_eq!(pair.bounds(), Some((1.5, 3.0)));
        assert!(pair.as_one().is_none());

        let one: EligibilityValue = serde_json::from_value(json!("OBC")).unwrap();
        assert_eq!(one.as_one().and_then(Scalar::as_text), Some("OBC"));
        assert_eq!(one.bounds(), None);

        let triple: EligibilityValue = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(triple.bounds(), None);
        assert!(serde_json::from_value::<EligibilityValue>(json!([{"a": 1}])).is_err());
    }

    #[test]
    fn test_bounds_absent_for_other_operators() {
        let rule: EligibilityRule = serde_json::from_value(json!({
            "field_key": "age", "step_name": "personal info step",
            "operator": "greater_than", "value": 18
        }))
        .unwrap();
        assert_eq!(rule.bounds(), None);
    }
}
