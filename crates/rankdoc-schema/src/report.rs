//! # Validation Report
//!
//! Structured output of every validation pass. A report is an ordered
//! list of [`Violation`]s; it is valid exactly when the list is empty.
//!
//! Each violation carries the path of the offending node
//! (`Rule[2].Data[0].get[1].field_key`), its [`ViolationKind`], and a
//! message. `Display` joins path and message with a single space, which
//! is the string form the editing surface renders.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Position of a node in the document tree.
///
/// Roots are named after the entity they hold (`Rule`, `Selection`,
/// `scoreMethod`, `Query`), indices render as `[i]`, and nested fields
/// are joined with `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(String);

impl NodePath {
    /// A root path segment.
    pub fn root(name: &str) -> Self {
        Self(name.to_string())
    }

    /// The `index`-th element of a root list, e.g. `Rule[2]`.
    pub fn root_item(name: &str, index: usize) -> Self {
        Self(format!("{name}[{index}]"))
    }

    /// A named child, e.g. `Rule[2].Data`.
    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    /// An indexed element of this path, e.g. `Rule[2].Data[0]`.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classification of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// An expected list or object is missing or of the wrong kind.
    Shape,
    /// A required scalar is absent or of the wrong primitive type.
    Required,
    /// A value lies outside its closed vocabulary.
    Enum,
    /// A value is of a legal type but outside the domain its operation allows.
    Domain,
    /// Two fields are individually legal but inconsistent together.
    CrossField,
}

impl ViolationKind {
    /// Lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Required => "required",
            Self::Enum => "enum",
            Self::Domain => "domain",
            Self::CrossField => "cross_field",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the offending node.
    pub path: String,
    /// Classification.
    pub kind: ViolationKind,
    /// Description, phrased to follow the path.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} {}", self.path, self.message)
        }
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// A report over already-collected violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Append the violations of another report, keeping order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    /// Whether no violations were found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Path-prefixed error strings in traversal order.
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Serializes as `{"isValid": bool, "errors": [string]}`.
impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors())?;
        state.end()
    }
}

/// Accumulates violations during one traversal.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    violations: Vec<Violation>,
}

impl Collector {
    pub(crate) fn push(&mut self, path: &NodePath, kind: ViolationKind, message: impl Into<String>) {
        self.violations.push(Violation {
            path: path.as_str().to_string(),
            kind,
            message: message.into(),
        });
    }

    pub(crate) fn finish(self) -> ValidationReport {
        ValidationReport::new(self.violations)
    }
}
