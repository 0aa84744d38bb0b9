//! # Polymorphic Field Values
//!
//! The wire format lets several fields hold "a string or a number" or
//! "a scalar or a list". Each of those fields gets its own sum type here
//! so that every consumer matches the shapes exhaustively instead of
//! probing an untyped value.
//!
//! Numbers are kept as [`serde_json::Number`] so an exported document
//! reproduces the integer/float spelling it was imported with.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Reserved [`AssignOption`] label: fallback when no other option matches.
pub const DEFAULT_OPTION: &str = "default";

/// Reserved [`AssignOption`] label: fallback when the source field is empty.
pub const EMPTY_OPTION: &str = "isEmpty";

/// A single string or number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A JSON number.
    Number(Number),
    /// A JSON string.
    Text(String),
}

impl Scalar {
    /// The string payload, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// The numeric payload as `f64`, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

/// Right-hand side of a [`Condition`](crate::Condition).
///
/// `in` compares against a [`List`](Self::List); `equals` and
/// `not equals` compare against a single [`One`](Self::One) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// A list of candidate values.
    List(Vec<Scalar>),
    /// A single value.
    One(Scalar),
}

impl ConditionValue {
    /// Whether this value is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Number of scalars carried.
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::One(_) => 1,
        }
    }

    /// Whether this is an empty list.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Scalar> for ConditionValue {
    fn from(s: Scalar) -> Self {
        Self::One(s)
    }
}

impl From<Vec<Scalar>> for ConditionValue {
    fn from(items: Vec<Scalar>) -> Self {
        Self::List(items)
    }
}

/// Parameter of a [`ScoreMethod`](crate::ScoreMethod).
///
/// Which shape is legal depends on the score operation; that table lives
/// in the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    /// A numeric factor or constant.
    Number(Number),
    /// A keyword such as `"Inverse"`, `"None"`, or a combination method name.
    Text(String),
}

impl ScoreValue {
    /// The keyword, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Whether this is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl From<&str> for ScoreValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for ScoreValue {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

/// Category label(s) matched by an [`AssignMethod`](crate::AssignMethod).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignOption {
    /// One label.
    One(String),
    /// Several labels sharing the same contribution.
    Many(Vec<String>),
}

impl AssignOption {
    /// All labels carried by this option.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::One(s) => vec![s.as_str()],
            Self::Many(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Whether `label` is one of the carried labels.
    pub fn matches(&self, label: &str) -> bool {
        match self {
            Self::One(s) => s == label,
            Self::Many(items) => items.iter().any(|s| s == label),
        }
    }

    /// Whether this option carries the [`DEFAULT_OPTION`] sentinel.
    pub fn is_default(&self) -> bool {
        self.matches(DEFAULT_OPTION)
    }

    /// Whether this option carries the [`EMPTY_OPTION`] sentinel.
    pub fn is_empty_fallback(&self) -> bool {
        self.matches(EMPTY_OPTION)
    }
}

impl From<&str> for AssignOption {
    fn from(s: &str) -> Self {
        Self::One(s.to_string())
    }
}
