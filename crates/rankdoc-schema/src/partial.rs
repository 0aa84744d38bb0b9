//! # Partial Validation
//!
//! A relaxed pass for documents still being assembled. It reports only
//! missing `field_key` / `step_name` on the field references that exist,
//! so the editing surface can flag an unfinished `get` row without
//! drowning the operator in errors about sections not yet written.
//!
//! Containers that are not arrays, and `get` entries that are not
//! objects, are skipped silently.
//! Conditions, score methods, assign methods, and container shapes are
//! never reported here.

use serde_json::Value;

use crate::report::{Collector, NodePath, ValidationReport, ViolationKind};
use crate::validate::{is_filled_string, REQUIRED_STRING};

/// Validate the field references of a document under construction.
pub fn validate_partial(doc: &Value) -> ValidationReport {
    let mut out = Collector::default();

    for (i, rule) in items(doc.get("rules")).iter().enumerate() {
        let path = NodePath::root_item("Rule", i).field("Data");
        field_refs(&mut out, &path, rule.get("Data"));
    }

    for (i, selection) in items(doc.get("Selection")).iter().enumerate() {
        let methods_path = NodePath::root_item("Selection", i).field("sortMethod");
        for (j, method) in items(selection.get("sortMethod")).iter().enumerate() {
            field_refs(&mut out, &methods_path.index(j).field("Data"), method.get("Data"));
        }
    }

    let report = out.finish();
    tracing::trace!(violations = report.len(), "partial document validated");
    report
}

fn items(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
}

fn field_refs(out: &mut Collector, data_path: &NodePath, blocks: Option<&Value>) {
    for (j, block) in items(blocks).iter().enumerate() {
        let get_path = data_path.index(j).field("get");
        for (k, field) in items(block.get("get")).iter().enumerate() {
            if !field.is_object() {
                continue;
            }
            let path = get_path.index(k);
            for key in ["field_key", "step_name"] {
                if !is_filled_string(field.get(key)) {
                    out.push(&path.field(key), ViolationKind::Required, REQUIRED_STRING);
                }
            }
        }
    }
}
