//! # Eligibility Validation
//!
//! Validates the flat eligibility dialect: a JSON array of
//! `{field_key, step_name, operator, value}` rules using the six
//! [`EligibilityOperator`]s. Same contract as the document validator:
//! never panics, never short-circuits, deterministic order.
//!
//! An array that passes [`validate_eligibility`] always decodes into
//! `Vec<EligibilityRule>`; [`parse_eligibility`] does both steps.

use serde::Deserialize;
use serde_json::{Map, Value};

use rankdoc_core::{EligibilityOperator, EligibilityRule, EligibilityValue};

use crate::report::{Collector, NodePath, ValidationReport, ViolationKind};
use crate::validate::{is_filled_string, REQUIRED_STRING};

/// Validate an array of eligibility rules.
pub fn validate_eligibility(rules: &Value) -> ValidationReport {
    let mut out = Collector::default();

    match rules {
        Value::Array(items) => {
            for (i, rule) in items.iter().enumerate() {
                let path = NodePath::root_item("Eligibility", i);
                match rule {
                    Value::Object(rule) => eligibility_rule(&mut out, &path, rule),
                    _ => out.push(&path, ViolationKind::Shape, "must be an object"),
                }
            }
        }
        _ => out.push(&NodePath::root("Eligibility"), ViolationKind::Shape, "must be an array"),
    }

    let report = out.finish();
    tracing::trace!(violations = report.len(), "eligibility rules validated");
    report
}

/// Validate, then decode into typed rules.
pub fn parse_eligibility(rules: &Value) -> Result<Vec<EligibilityRule>, ValidationReport> {
    let report = validate_eligibility(rules);
    if !report.is_valid() {
        return Err(report);
    }
    Vec::<EligibilityRule>::deserialize(rules).map_err(|e| {
        let mut out = Collector::default();
        out.push(
            &NodePath::root("Eligibility"),
            ViolationKind::Shape,
            format!("could not be decoded: {e}"),
        );
        out.finish()
    })
}

fn eligibility_rule(out: &mut Collector, path: &NodePath, rule: &Map<String, Value>) {
    for key in ["field_key", "step_name"] {
        if !is_filled_string(rule.get(key)) {
            out.push(&path.field(key), ViolationKind::Required, REQUIRED_STRING);
        }
    }

    let operator = rule
        .get("operator")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<EligibilityOperator>().ok());
    if operator.is_none() {
        out.push(
            &path.field("operator"),
            ViolationKind::Enum,
            format!("must be one of: {}", EligibilityOperator::names().join(", ")),
        );
    }

    let value = rule.get("value").filter(|v| !v.is_null());
    let value_path = path.field("value");
    match (value, operator) {
        (None, _) => out.push(&value_path, ViolationKind::Required, "is required"),
        (Some(v), Some(op)) => {
            if let Some(msg) = operand_violation(op, v) {
                out.push(&value_path, ViolationKind::Domain, msg);
            }
        }
        (Some(_), None) => {}
    }
}

fn operand_violation(operator: EligibilityOperator, value: &Value) -> Option<String> {
    let operand = EligibilityValue::deserialize(value).ok();
    let expectation = match operator {
        EligibilityOperator::In | EligibilityOperator::NotIn => match operand {
            Some(EligibilityValue::List(_)) => return None,
            _ if value.is_array() => "must be an array of strings or numbers",
            _ => "must be an array",
        },
        EligibilityOperator::Between => match operand.as_ref().and_then(EligibilityValue::bounds) {
            Some((lo, hi)) if lo <= hi => return None,
            Some(_) => "must have a lower bound not above its upper bound",
            None => "must be a [min, max] pair of numbers",
        },
        EligibilityOperator::GreaterThan | EligibilityOperator::LessThan => {
            match operand.as_ref().and_then(EligibilityValue::as_one) {
                Some(one) if one.as_f64().is_some() => return None,
                _ => "must be a number",
            }
        }
        EligibilityOperator::Equals => match operand {
            Some(EligibilityValue::One(_)) => return None,
            _ => "must be a single value",
        },
    };
    Some(format!("{expectation} when operator is '{operator}'"))
}
