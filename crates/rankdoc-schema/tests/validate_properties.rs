//! Property tests for the validator: no panics on arbitrary JSON,
//! idempotence, and the per-node guarantees the editing surface relies on.

use proptest::prelude::*;
use rankdoc_schema::{
    parse_eligibility, validate_eligibility, validate_partial, validate_query, ViolationKind,
};
use serde_json::{json, Map, Value};

const KEYS: &[&str] = &[
    "rules",
    "Selection",
    "scoreMethod",
    "assignMethod",
    "Data",
    "if",
    "get",
    "field_key",
    "step_name",
    "course",
    "operator",
    "value",
    "operation",
    "option",
    "dropEmptyRow",
    "quantity",
    "sortMethod",
    "sortOrder",
];

const WORDS: &[&str] = &[
    "in",
    "equals",
    "not equals",
    "Percentile",
    "Multiplication",
    "Addition",
    "many2one",
    "Inverse",
    "None",
    "all",
    "none",
    "Ascending",
    "Descending",
    "default",
    "isEmpty",
    "",
];

/// JSON trees biased toward the document vocabulary so that generated
/// values reach deep into the traversal.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        prop::sample::select(WORDS).prop_map(Value::from),
        "[a-z]{1,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(6, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..6).prop_map(|pairs| {
                Value::Object(
                    pairs
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect::<Map<String, Value>>(),
                )
            }),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Value> {
    (arb_json(), arb_json(), arb_json()).prop_map(|(rules, selection, methods)| {
        json!({"rules": rules, "Selection": selection, "scoreMethod": methods})
    })
}

fn condition_doc(condition: Value) -> Value {
    json!({
        "rules": [{"Data": [{"if": [condition], "get": []}]}],
        "Selection": [],
        "scoreMethod": []
    })
}

proptest! {
    #[test]
    fn validation_never_panics_and_is_idempotent(doc in arb_document()) {
        let first = validate_query(&doc);
        let second = validate_query(&doc);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.is_valid(), first.errors().is_empty());
    }

    #[test]
    fn arbitrary_roots_never_panic(value in arb_json()) {
        let _ = validate_query(&value);
        let _ = validate_partial(&value);
        let _ = validate_eligibility(&value);
    }

    #[test]
    fn valid_eligibility_always_decodes(value in arb_json()) {
        if validate_eligibility(&value).is_valid() {
            prop_assert!(parse_eligibility(&value).is_ok());
        }
    }

    #[test]
    fn partial_reports_only_field_ref_keys(doc in arb_document()) {
        for v in validate_partial(&doc).violations() {
            prop_assert_eq!(v.kind, ViolationKind::Required);
            prop_assert!(v.path.contains(".get["), "{}", v.path);
            prop_assert!(
                v.path.ends_with(".field_key") || v.path.ends_with(".step_name"),
                "{}", v.path
            );
        }
    }

    #[test]
    fn in_condition_with_string_list_is_clean(
        field_key in "[a-zA-Z]{1,12}",
        step_name in "[a-z ]{0,10}[a-z]",
        values in prop::collection::vec("[A-Za-z]{1,8}", 1..6),
    ) {
        let doc = condition_doc(json!({
            "field_key": field_key, "step_name": step_name,
            "operator": "in", "value": values
        }));
        let report = validate_query(&doc);
        prop_assert!(report.is_valid(), "{}", report);
    }

    #[test]
    fn one_error_per_missing_condition_key(drop_key in any::<bool>(), drop_step in any::<bool>()) {
        let mut condition = json!({
            "field_key": "category", "step_name": "personal info step",
            "operator": "equals", "value": "SC"
        });
        if drop_key {
            condition.as_object_mut().unwrap().remove("field_key");
        }
        if drop_step {
            condition.as_object_mut().unwrap().remove("step_name");
        }
        let report = validate_query(&condition_doc(condition));
        prop_assert_eq!(report.len(), usize::from(drop_key) + usize::from(drop_step));
    }

    #[test]
    fn unknown_operation_yields_only_enum_error(operation in "[A-Za-z]{1,14}", value in arb_json()) {
        prop_assume!(operation.parse::<rankdoc_core::ScoreOperation>().is_err());
        prop_assume!(!value.is_null());
        let doc = json!({
            "rules": [],
            "Selection": [],
            "scoreMethod": [{"value": value, "operation": operation}]
        });
        let report = validate_query(&doc);
        prop_assert_eq!(
            report.errors(),
            vec!["scoreMethod[0].operation must be one of: Percentile, Multiplication, Addition, many2one, Inverse, None".to_string()]
        );
    }
}

#[test]
fn null_containers_are_reported_independently() {
    let containers = ["rules", "Selection", "scoreMethod"];
    for mask in 1u8..8 {
        let mut doc = json!({"rules": [], "Selection": [], "scoreMethod": []});
        let mut expected = Vec::new();
        for (bit, name) in containers.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                doc[*name] = Value::Null;
                expected.push(format!("{name} must be an array"));
            }
        }
        let report = validate_query(&doc);
        assert!(!report.is_valid());
        assert_eq!(report.errors(), expected);
    }
}

#[test]
fn concrete_scenario_minimal_document() {
    let doc = json!({
        "rules": [{
            "Data": [{"if": [], "get": [{"field_key": "familyIncome", "step_name": "personal info step"}]}],
            "scoreMethod": [{"value": "Inverse", "operation": "Percentile"}]
        }],
        "Selection": [],
        "scoreMethod": [{"value": "Addition", "operation": "many2one", "dropEmptyRow": "all"}]
    });
    let report = validate_query(&doc);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({"isValid": true, "errors": []})
    );
}

#[test]
fn concrete_scenario_assign_value_not_numeric() {
    let doc = json!({
        "rules": [{"Data": [], "assignMethod": [{"value": "15", "option": "Orphan"}]}],
        "Selection": [],
        "scoreMethod": []
    });
    let errors = validate_query(&doc).errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].ends_with("assignMethod[0].value must be a number"));
}

#[test]
fn concrete_scenario_bad_selection_sort_order() {
    let doc = json!({
        "rules": [],
        "Selection": [{"quantity": {"sortOrder": "Up"}, "sortMethod": []}],
        "scoreMethod": []
    });
    let errors = validate_query(&doc).errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("quantity.sortOrder must be either 'Ascending' or 'Descending'"));
}
