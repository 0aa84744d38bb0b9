//! # Document Validation
//!
//! Walks an untrusted JSON value against the document model and reports
//! every structural and semantic violation it finds.
//!
//! ## Contract
//!
//! - Never panics. Any JSON value is accepted; a type mismatch becomes a
//!   violation, not a failure.
//! - Never short-circuits. The editing surface shows every problem at
//!   once, so traversal continues past each violation as far as the data
//!   allows. A container that is not an array yields one violation and
//!   its children are not visited.
//! - Deterministic. The same input always yields the same violations in
//!   the same order.
//!
//! ## Traversal Order
//!
//! ```text
//! root object
//! ├── rules / Selection / scoreMethod container checks
//! ├── Rule[i]            Data[j] → if[k] → get[k], scoreMethod[k], assignMethod[k], body check
//! ├── Selection[i]       quantity → sortMethod[j] (Data recursion, then sortOrder)
//! └── scoreMethod[i]
//! ```
//!
//! ## Thread Safety
//!
//! [`Validator`] holds only its options. Each call allocates its own
//! accumulator, so one validator may be shared freely across threads.

use serde_json::{Map, Value};

use rankdoc_core::{ConditionOperator, Document, DropEmptyRow, ScoreOperation, SortOrder};

use crate::report::{Collector, NodePath, ValidationReport, ViolationKind};
use crate::semantics::{condition_value_violation, has_default_option, score_value_violation};

pub(crate) const REQUIRED_STRING: &str = "is required and must be a string";

/// Opt-in checks beyond the base rules. All default to off, which
/// reproduces the permissive behavior the editing surface relies on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Require `in` conditions to carry an array and `equals` /
    /// `not equals` conditions to carry a single value.
    pub strict_condition_values: bool,
    /// Require every populated `assignMethod` table to include a
    /// `"default"` fallback row.
    pub require_default_option: bool,
    /// Reject rules that populate both `scoreMethod` and `assignMethod`.
    pub exclusive_rule_body: bool,
}

/// A configured document validator.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    /// A validator with the base rules only.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator with opt-in checks enabled.
    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// The active options.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate an untrusted JSON document.
    pub fn validate(&self, doc: &Value) -> ValidationReport {
        let mut walk = Walk {
            options: &self.options,
            out: Collector::default(),
        };
        walk.document(doc);
        let report = walk.out.finish();
        tracing::trace!(violations = report.len(), "document validated");
        report
    }

    /// Validate a typed document through its wire form.
    pub fn validate_document(&self, doc: &Document) -> ValidationReport {
        match doc.to_value() {
            Ok(value) => self.validate(&value),
            Err(e) => {
                let mut out = Collector::default();
                out.push(
                    &NodePath::root("Query"),
                    ViolationKind::Shape,
                    format!("could not be serialized: {e}"),
                );
                out.finish()
            }
        }
    }
}

/// Validate an untrusted JSON document with the base rules.
pub fn validate_query(doc: &Value) -> ValidationReport {
    Validator::new().validate(doc)
}

/// Validate a typed document with the base rules.
pub fn validate_document(doc: &Document) -> ValidationReport {
    Validator::new().validate_document(doc)
}

/// Whether `value` is a non-empty string.
pub(crate) fn is_filled_string(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).is_some_and(|s| !s.is_empty())
}

/// Treats an explicit `null` the same as an absent key.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn one_of(names: &[&str]) -> String {
    format!("must be one of: {}", names.join(", "))
}

struct Walk<'a> {
    options: &'a ValidationOptions,
    out: Collector,
}

impl Walk<'_> {
    // ── Shape helpers ────────────────────────────────────────────────

    fn array<'v>(&mut self, path: &NodePath, value: Option<&'v Value>) -> Option<&'v [Value]> {
        match value {
            Some(Value::Array(items)) => Some(items.as_slice()),
            _ => {
                self.out.push(path, ViolationKind::Shape, "must be an array");
                None
            }
        }
    }

    fn object<'v>(&mut self, path: &NodePath, value: &'v Value) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => {
                self.out.push(path, ViolationKind::Shape, "must be an object");
                None
            }
        }
    }

    fn required_string(&mut self, path: &NodePath, obj: &Map<String, Value>, key: &str) {
        if !is_filled_string(obj.get(key)) {
            self.out.push(&path.field(key), ViolationKind::Required, REQUIRED_STRING);
        }
    }

    fn sort_order(&mut self, path: &NodePath, obj: &Map<String, Value>) {
        let legal = obj
            .get("sortOrder")
            .and_then(Value::as_str)
            .is_some_and(|s| s.parse::<SortOrder>().is_ok());
        if !legal {
            self.out.push(
                &path.field("sortOrder"),
                ViolationKind::Enum,
                "must be either 'Ascending' or 'Descending'",
            );
        }
    }

    // ── Document ─────────────────────────────────────────────────────

    fn document(&mut self, doc: &Value) {
        let Some(root) = self.object(&NodePath::root("Query"), doc) else {
            return;
        };

        let rules = self.array(&NodePath::root("rules"), root.get("rules"));
        let selections = self.array(&NodePath::root("Selection"), root.get("Selection"));
        let methods = self.array(&NodePath::root("scoreMethod"), root.get("scoreMethod"));

        for (i, rule) in rules.unwrap_or_default().iter().enumerate() {
            self.rule(&NodePath::root_item("Rule", i), rule);
        }
        for (i, selection) in selections.unwrap_or_default().iter().enumerate() {
            self.selection(&NodePath::root_item("Selection", i), selection);
        }
        for (i, method) in methods.unwrap_or_default().iter().enumerate() {
            self.score_method(&NodePath::root_item("scoreMethod", i), method);
        }
    }

    // ── Rule ─────────────────────────────────────────────────────────

    fn rule(&mut self, path: &NodePath, value: &Value) {
        let Some(rule) = self.object(path, value) else {
            return;
        };

        let data_path = path.field("Data");
        if let Some(blocks) = self.array(&data_path, rule.get("Data")) {
            self.data_blocks(&data_path, blocks);
        }

        let score_path = path.field("scoreMethod");
        let score_methods = match present(rule.get("scoreMethod")) {
            Some(v) => self.array(&score_path, Some(v)),
            None => None,
        };
        for (k, method) in score_methods.unwrap_or_default().iter().enumerate() {
            self.score_method(&score_path.index(k), method);
        }

        let assign_path = path.field("assignMethod");
        let assign_methods = match present(rule.get("assignMethod")) {
            Some(v) => self.array(&assign_path, Some(v)),
            None => None,
        };
        for (k, method) in assign_methods.unwrap_or_default().iter().enumerate() {
            self.assign_method(&assign_path.index(k), method);
        }

        let scored = score_methods.is_some_and(|m| !m.is_empty());
        let assigned = assign_methods.is_some_and(|m| !m.is_empty());
        if self.options.exclusive_rule_body && scored && assigned {
            self.out.push(
                path,
                ViolationKind::CrossField,
                "must use either scoreMethod or assignMethod, not both",
            );
        }

        if self.options.require_default_option && assigned {
            if let Some(rows) = assign_methods {
                if !has_default_option(rows) {
                    self.out.push(
                        &assign_path,
                        ViolationKind::CrossField,
                        "must include a 'default' option",
                    );
                }
            }
        }
    }

    // ── Data blocks ──────────────────────────────────────────────────

    fn data_blocks(&mut self, path: &NodePath, blocks: &[Value]) {
        for (j, block) in blocks.iter().enumerate() {
            self.data_block(&path.index(j), block);
        }
    }

    fn data_block(&mut self, path: &NodePath, value: &Value) {
        let Some(block) = self.object(path, value) else {
            return;
        };

        let if_path = path.field("if");
        if let Some(conditions) = self.array(&if_path, block.get("if")) {
            for (k, condition) in conditions.iter().enumerate() {
                self.condition(&if_path.index(k), condition);
            }
        }

        let get_path = path.field("get");
        if let Some(fields) = self.array(&get_path, block.get("get")) {
            for (k, field) in fields.iter().enumerate() {
                self.field_ref(&get_path.index(k), field);
            }
        }
    }

    fn condition(&mut self, path: &NodePath, value: &Value) {
        let Some(condition) = self.object(path, value) else {
            return;
        };

        self.required_string(path, condition, "field_key");
        self.required_string(path, condition, "step_name");

        let operator = condition
            .get("operator")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<ConditionOperator>().ok());
        if operator.is_none() {
            self.out.push(
                &path.field("operator"),
                ViolationKind::Enum,
                one_of(ConditionOperator::names()),
            );
        }

        match present(condition.get("value")) {
            None => self
                .out
                .push(&path.field("value"), ViolationKind::Required, "is required"),
            Some(v) => {
                if let (true, Some(op)) = (self.options.strict_condition_values, operator) {
                    if let Some(msg) = condition_value_violation(op, v) {
                        self.out.push(&path.field("value"), ViolationKind::CrossField, msg);
                    }
                }
            }
        }
    }

    fn field_ref(&mut self, path: &NodePath, value: &Value) {
        let Some(field) = self.object(path, value) else {
            return;
        };

        self.required_string(path, field, "field_key");
        self.required_string(path, field, "step_name");

        if let Some(course) = present(field.get("course")) {
            if !course.is_string() {
                self.out
                    .push(&path.field("course"), ViolationKind::Required, "must be a string");
            }
        }
    }

    // ── Scoring ──────────────────────────────────────────────────────

    fn score_method(&mut self, path: &NodePath, value: &Value) {
        let Some(method) = self.object(path, value) else {
            return;
        };

        let score_value = present(method.get("value"));
        if score_value.is_none() {
            self.out
                .push(&path.field("value"), ViolationKind::Required, "is required");
        }

        let operation = method
            .get("operation")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<ScoreOperation>().ok());
        if operation.is_none() {
            self.out.push(
                &path.field("operation"),
                ViolationKind::Enum,
                one_of(ScoreOperation::names()),
            );
        }

        if let (Some(v), Some(op)) = (score_value, operation) {
            if let Some(msg) = score_value_violation(op, v) {
                self.out.push(&path.field("value"), ViolationKind::Domain, msg);
            }
        }

        if let Some(drop) = present(method.get("dropEmptyRow")) {
            let legal = drop
                .as_str()
                .is_some_and(|s| s.parse::<DropEmptyRow>().is_ok());
            if !legal {
                self.out.push(
                    &path.field("dropEmptyRow"),
                    ViolationKind::Enum,
                    "must be either 'all' or 'none'",
                );
            }
        }
    }

    fn assign_method(&mut self, path: &NodePath, value: &Value) {
        let Some(method) = self.object(path, value) else {
            return;
        };

        if !method.get("value").is_some_and(Value::is_number) {
            self.out
                .push(&path.field("value"), ViolationKind::Required, "must be a number");
        }

        let option_path = path.field("option");
        match method.get("option") {
            Some(Value::String(_)) => {}
            Some(Value::Array(items)) => {
                for (n, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        self.out.push(
                            &option_path.index(n),
                            ViolationKind::Required,
                            "must be a string",
                        );
                    }
                }
            }
            _ => self.out.push(
                &option_path,
                ViolationKind::Required,
                "must be a string or an array of strings",
            ),
        }
    }

    // ── Selection ────────────────────────────────────────────────────

    fn selection(&mut self, path: &NodePath, value: &Value) {
        let Some(selection) = self.object(path, value) else {
            return;
        };

        let quantity_path = path.field("quantity");
        match selection.get("quantity") {
            Some(Value::Object(quantity)) => self.sort_order(&quantity_path, quantity),
            _ => self
                .out
                .push(&quantity_path, ViolationKind::Shape, "must be an object"),
        }

        let methods_path = path.field("sortMethod");
        if let Some(methods) = self.array(&methods_path, selection.get("sortMethod")) {
            for (j, method) in methods.iter().enumerate() {
                self.sort_method(&methods_path.index(j), method);
            }
        }
    }

    fn sort_method(&mut self, path: &NodePath, value: &Value) {
        let Some(method) = self.object(path, value) else {
            return;
        };

        let data_path = path.field("Data");
        if let Some(blocks) = self.array(&data_path, method.get("Data")) {
            self.data_blocks(&data_path, blocks);
        }

        self.sort_order(path, method);
    }
}
