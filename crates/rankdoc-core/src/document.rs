//! # Document Model
//!
//! The typed form of the eligibility/scoring/selection document:
//!
//! ```text
//! Document
//! ├── rules: [Rule]
//! │     ├── Data: [DataBlock { if: [Condition], get: [FieldRef] }]
//! │     └── body: Score([ScoreMethod]) | Assign([AssignMethod])
//! ├── Selection: [Selection]
//! │     ├── quantity: { sortOrder }
//! │     └── sortMethod: [SortMethod { Data: [DataBlock], sortOrder }]
//! └── scoreMethod: [ScoreMethod]
//! ```
//!
//! All entities are immutable values. Edits replace whole lists; nothing
//! is patched in place.
//!
//! ## Wire Names
//!
//! Field names are bit-exact (`Data`, `Selection`, `sortOrder`,
//! `dropEmptyRow`, `field_key`, ...). The evaluation engine matches them
//! literally, so every rename is spelled out in a serde attribute.
//!
//! ## Rule Bodies
//!
//! A rule is scored either by a formula list (`scoreMethod`) or by a
//! lookup table (`assignMethod`), never both. [`RuleBody`] encodes that
//! choice; on the wire the two optional keys are kept. A rule carrying
//! two non-empty lists fails to decode with
//! [`RuleBodyError`](crate::error::RuleBodyError).

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::canonical::CanonicalBytes;
use crate::digest::{sha256_digest, ContentDigest};
use crate::error::{RankdocError, RuleBodyError};
use crate::operator::{ConditionOperator, DropEmptyRow, ScoreOperation, SortOrder};
use crate::value::{AssignOption, ConditionValue, ScoreValue};

/// A filter test against one candidate field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Identifier of the candidate attribute.
    pub field_key: String,
    /// Intake step the attribute belongs to.
    pub step_name: String,
    /// Comparison to apply.
    pub operator: ConditionOperator,
    /// Right-hand side of the comparison.
    pub value: ConditionValue,
}

/// Identifies one piece of candidate data to retrieve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Identifier of the candidate attribute.
    pub field_key: String,
    /// Intake step the attribute belongs to.
    pub step_name: String,
    /// Course/grade the attribute is scoped to, for course-scoped fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

impl FieldRef {
    /// A field reference without course scope.
    pub fn new(field_key: impl Into<String>, step_name: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            step_name: step_name.into(),
            course: None,
        }
    }

    /// The same reference scoped to `course`.
    pub fn in_course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }
}

/// "Retrieve these fields when these conditions hold."
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataBlock {
    /// Conditions that must all hold. Empty means unconditional.
    #[serde(rename = "if")]
    pub conditions: Vec<Condition>,
    /// Fields to retrieve.
    #[serde(rename = "get")]
    pub fields: Vec<FieldRef>,
}

impl DataBlock {
    /// An unconditional block retrieving `fields`.
    pub fn unconditional(fields: Vec<FieldRef>) -> Self {
        Self {
            conditions: Vec::new(),
            fields,
        }
    }

    /// Whether the block applies to every candidate.
    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// A numeric transformation producing a ranking contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMethod {
    /// Operation parameter; its legal shape depends on `operation`.
    pub value: ScoreValue,
    /// The transformation.
    pub operation: ScoreOperation,
    /// Empty-row policy, when set.
    #[serde(rename = "dropEmptyRow", default, skip_serializing_if = "Option::is_none")]
    pub drop_empty_row: Option<DropEmptyRow>,
}

impl ScoreMethod {
    /// A score method with no empty-row policy.
    pub fn new(operation: ScoreOperation, value: impl Into<ScoreValue>) -> Self {
        Self {
            value: value.into(),
            operation,
            drop_empty_row: None,
        }
    }

    /// The pass-through method: operation `None` with its value forced to `"None"`.
    pub fn passthrough() -> Self {
        Self::new(ScoreOperation::None, "None")
    }

    /// The same method with an empty-row policy.
    pub fn dropping(mut self, policy: DropEmptyRow) -> Self {
        self.drop_empty_row = Some(policy);
        self
    }
}

/// One row of a categorical-to-numeric lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignMethod {
    /// Contribution assigned when `option` matches.
    pub value: Number,
    /// Category label(s); `"default"` and `"isEmpty"` are reserved.
    pub option: AssignOption,
}

impl AssignMethod {
    /// A lookup row.
    pub fn new(value: impl Into<Number>, option: impl Into<AssignOption>) -> Self {
        Self {
            value: value.into(),
            option: option.into(),
        }
    }
}

/// How a rule turns retrieved data into a contribution.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleBody {
    /// Formula scoring.
    Score(Vec<ScoreMethod>),
    /// Lookup-table scoring.
    Assign(Vec<AssignMethod>),
}

/// One ranking rule: data to retrieve and how to score it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RuleRepr", into = "RuleRepr")]
pub struct Rule {
    /// Data blocks feeding the rule.
    pub data: Vec<DataBlock>,
    /// Scoring body; `None` while the rule is still being built.
    pub body: Option<RuleBody>,
}

impl Rule {
    /// A formula-scored rule.
    pub fn scored(data: Vec<DataBlock>, methods: Vec<ScoreMethod>) -> Self {
        Self {
            data,
            body: Some(RuleBody::Score(methods)),
        }
    }

    /// A lookup-scored rule.
    pub fn assigned(data: Vec<DataBlock>, methods: Vec<AssignMethod>) -> Self {
        Self {
            data,
            body: Some(RuleBody::Assign(methods)),
        }
    }

    /// The same rule with its body swapped. This is the exclusive
    /// score/assign toggle: setting one discards the other.
    pub fn with_body(mut self, body: RuleBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Formula methods, if the rule is formula-scored.
    pub fn score_methods(&self) -> Option<&[ScoreMethod]> {
        match &self.body {
            Some(RuleBody::Score(methods)) => Some(methods),
            _ => None,
        }
    }

    /// Lookup rows, if the rule is lookup-scored.
    pub fn assign_methods(&self) -> Option<&[AssignMethod]> {
        match &self.body {
            Some(RuleBody::Assign(methods)) => Some(methods),
            _ => None,
        }
    }
}

/// Wire form of [`Rule`]: two optional lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleRepr {
    #[serde(rename = "Data")]
    data: Vec<DataBlock>,
    #[serde(rename = "scoreMethod", default, skip_serializing_if = "Option::is_none")]
    score_method: Option<Vec<ScoreMethod>>,
    #[serde(rename = "assignMethod", default, skip_serializing_if = "Option::is_none")]
    assign_method: Option<Vec<AssignMethod>>,
}

impl TryFrom<RuleRepr> for Rule {
    type Error = RuleBodyError;

    fn try_from(repr: RuleRepr) -> Result<Self, Self::Error> {
        let body = match (repr.score_method, repr.assign_method) {
            (None, None) => None,
            (Some(score), None) => Some(RuleBody::Score(score)),
            (None, Some(assign)) => Some(RuleBody::Assign(assign)),
            (Some(score), Some(assign)) => match (score.is_empty(), assign.is_empty()) {
                (_, true) => Some(RuleBody::Score(score)),
                (true, false) => Some(RuleBody::Assign(assign)),
                (false, false) => {
                    return Err(RuleBodyError {
                        score_methods: score.len(),
                        assign_methods: assign.len(),
                    })
                }
            },
        };
        Ok(Self {
            data: repr.data,
            body,
        })
    }
}

impl From<Rule> for RuleRepr {
    fn from(rule: Rule) -> Self {
        let (score_method, assign_method) = match rule.body {
            None => (None, None),
            Some(RuleBody::Score(methods)) => (Some(methods), None),
            Some(RuleBody::Assign(methods)) => (None, Some(methods)),
        };
        Self {
            data: rule.data,
            score_method,
            assign_method,
        }
    }
}

/// One sort key of a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortMethod {
    /// Data blocks producing the sort key.
    #[serde(rename = "Data")]
    pub data: Vec<DataBlock>,
    /// Direction of the key.
    #[serde(rename = "sortOrder")]
    pub sort_order: SortOrder,
}

/// Ordering applied to the selected quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quantity {
    /// Direction in which the final score is read.
    #[serde(rename = "sortOrder")]
    pub sort_order: SortOrder,
}

/// Final ordering/limiting configuration.
///
/// `sort_method` order is the tie-break priority chain: the first entry
/// is the primary key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Primary ordering of the quantity.
    pub quantity: Quantity,
    /// Tie-break keys in priority order.
    #[serde(rename = "sortMethod")]
    pub sort_method: Vec<SortMethod>,
}

/// The complete exported artifact (`QueryBuilderSchema`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Ranking rules.
    pub rules: Vec<Rule>,
    /// Selection configurations.
    #[serde(rename = "Selection")]
    pub selection: Vec<Selection>,
    /// Global combination of per-rule scores.
    #[serde(rename = "scoreMethod")]
    pub score_method: Vec<ScoreMethod>,
}

impl Document {
    /// The empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Coerce an untrusted JSON value into a typed document.
    ///
    /// Success means the *shape* fits the model; semantic validity is
    /// the validator's concern. Every container is required: a missing
    /// list is a shape error, never an empty one.
    pub fn from_value(value: &Value) -> Result<Self, RankdocError> {
        Self::deserialize(value).map_err(|e| RankdocError::Shape(e.to_string()))
    }

    /// Parse and coerce a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, RankdocError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }

    /// The wire form of this document.
    pub fn to_value(&self) -> Result<Value, RankdocError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty-printed wire form.
    pub fn to_json_pretty(&self) -> Result<String, RankdocError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JCS-canonical bytes of the wire form.
    pub fn canonical_bytes(&self) -> Result<CanonicalBytes, RankdocError> {
        Ok(CanonicalBytes::new(self)?)
    }

    /// SHA-256 digest of the canonical wire form.
    pub fn digest(&self) -> Result<ContentDigest, RankdocError> {
        Ok(sha256_digest(&self.canonical_bytes()?))
    }

    /// Whether the document has no rules, selections, or global methods.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.selection.is_empty() && self.score_method.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn income_block() -> DataBlock {
        DataBlock::unconditional(vec![FieldRef::new("familyIncome", "personal info step")])
    }

    #[test]
    fn test_empty_document_wire_form() {
        let doc = Document::empty();
        assert!(doc.is_empty());
        assert_eq!(
            doc.to_value().unwrap(),
            json!({"rules": [], "Selection": [], "scoreMethod": []})
        );
    }

    #[test]
    fn test_rule_wire_names() {
        let rule = Rule::scored(
            vec![income_block()],
            vec![ScoreMethod::new(ScoreOperation::Percentile, "Inverse")],
        );
        let v = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            v,
            json!({
                "Data": [{"if": [], "get": [{"field_key": "familyIncome", "step_name": "personal info step"}]}],
                "scoreMethod": [{"value": "Inverse", "operation": "Percentile"}]
            })
        );
        assert!(v.get("assignMethod").is_none());
    }

    #[test]
    fn test_rule_body_selected_by_non_empty_list() {
        let rule: Rule = serde_json::from_value(json!({
            "Data": [],
            "scoreMethod": [],
            "assignMethod": [{"value": 15, "option": "Orphan"}]
        }))
        .unwrap();
        assert_eq!(rule.assign_methods().map(<[_]>::len), Some(1));
        assert!(rule.score_methods().is_none());
    }

    #[test]
    fn test_rule_body_both_populated_is_rejected() {
        let result: Result<Rule, _> = serde_json::from_value(json!({
            "Data": [],
            "scoreMethod": [{"value": 2, "operation": "Multiplication"}],
            "assignMethod": [{"value": 15, "option": "Orphan"}]
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("only one list may be populated"), "{err}");
    }

    #[test]
    fn test_rule_without_body() {
        let rule: Rule = serde_json::from_value(json!({"Data": []})).unwrap();
        assert_eq!(rule.body, None);
        assert_eq!(serde_json::to_value(&rule).unwrap(), json!({"Data": []}));
    }

    #[test]
    fn test_with_body_toggles_exclusively() {
        let rule = Rule::scored(vec![], vec![ScoreMethod::passthrough()])
            .with_body(RuleBody::Assign(vec![AssignMethod::new(10, "default")]));
        assert!(rule.score_methods().is_none());
        assert_eq!(rule.assign_methods().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_passthrough_forces_none_value() {
        let m = ScoreMethod::passthrough();
        assert_eq!(m.operation, ScoreOperation::None);
        assert_eq!(m.value, ScoreValue::from("None"));
    }

    #[test]
    fn test_field_ref_course_is_optional_on_wire() {
        let plain = serde_json::to_value(FieldRef::new("percentage", "grades")).unwrap();
        assert!(plain.get("course").is_none());

        let scoped = serde_json::to_value(FieldRef::new("percentage", "grades").in_course("10th")).unwrap();
        assert_eq!(scoped["course"], "10th");
    }

    #[test]
    fn test_from_value_reports_shape_error() {
        let err = Document::from_value(&json!({"rules": "nope"})).unwrap_err();
        assert!(matches!(err, RankdocError::Shape(_)));
    }

    #[test]
    fn test_missing_containers_are_shape_errors() {
        for raw in [
            json!({}),
            json!({"rules": [], "Selection": []}),
            json!({"rules": [{"scoreMethod": []}], "Selection": [], "scoreMethod": []}),
            json!({"rules": [{"Data": [{"get": []}]}], "Selection": [], "scoreMethod": []}),
            json!({"rules": [{"Data": [{"if": []}]}], "Selection": [], "scoreMethod": []}),
            json!({"rules": [], "Selection": [{"quantity": {"sortOrder": "Ascending"}}], "scoreMethod": []}),
            json!({"rules": [], "Selection": [{"quantity": {"sortOrder": "Ascending"},
                   "sortMethod": [{"sortOrder": "Ascending"}]}], "scoreMethod": []}),
        ] {
            let err = Document::from_value(&raw).unwrap_err();
            assert!(matches!(err, RankdocError::Shape(_)), "{raw}");
        }
        assert!(Document::from_value(&json!({"rules": [], "Selection": [], "scoreMethod": []}))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_selection_wire_form() {
        let sel = Selection {
            quantity: Quantity {
                sort_order: SortOrder::Descending,
            },
            sort_method: vec![SortMethod {
                data: vec![income_block()],
                sort_order: SortOrder::Ascending,
            }],
        };
        let v = serde_json::to_value(&sel).unwrap();
        assert_eq!(v["quantity"]["sortOrder"], "Descending");
        assert_eq!(v["sortMethod"][0]["sortOrder"], "Ascending");
        assert_eq!(v["sortMethod"][0]["Data"][0]["get"][0]["field_key"], "familyIncome");
    }
}
