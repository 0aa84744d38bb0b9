//! Import/export round trip and structural-edit properties over
//! generated documents.

use proptest::prelude::*;
use rankdoc_core::{
    AssignMethod, AssignOption, Condition, ConditionOperator, ConditionValue, DataBlock, Document,
    DropEmptyRow, FieldRef, Quantity, Rule, RuleBody, Scalar, ScoreMethod, ScoreOperation,
    ScoreValue, Selection, SortMethod, SortOrder,
};
use rankdoc_store::DocumentStore;

fn arb_label() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z ]{0,11}"
}

fn arb_scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<i32>().prop_map(|n| Scalar::Number(n.into())),
        arb_label().prop_map(Scalar::Text),
    ]
}

fn arb_condition() -> impl Strategy<Value = Condition> {
    (
        arb_label(),
        arb_label(),
        prop::sample::select(ConditionOperator::all()),
        prop_oneof![
            arb_scalar().prop_map(ConditionValue::One),
            prop::collection::vec(arb_scalar(), 0..4).prop_map(ConditionValue::List),
        ],
    )
        .prop_map(|(field_key, step_name, operator, value)| Condition {
            field_key,
            step_name,
            operator,
            value,
        })
}

fn arb_field_ref() -> impl Strategy<Value = FieldRef> {
    (arb_label(), arb_label(), prop::option::of(arb_label())).prop_map(
        |(field_key, step_name, course)| FieldRef {
            field_key,
            step_name,
            course,
        },
    )
}

fn arb_data() -> impl Strategy<Value = Vec<DataBlock>> {
    prop::collection::vec(
        (
            prop::collection::vec(arb_condition(), 0..3),
            prop::collection::vec(arb_field_ref(), 0..3),
        )
            .prop_map(|(conditions, fields)| DataBlock { conditions, fields }),
        0..3,
    )
}

fn arb_score_method() -> impl Strategy<Value = ScoreMethod> {
    (
        prop::sample::select(ScoreOperation::all()),
        prop_oneof![
            any::<i32>().prop_map(|n| ScoreValue::Number(n.into())),
            arb_label().prop_map(ScoreValue::Text),
        ],
        prop::option::of(prop::sample::select(vec![DropEmptyRow::All, DropEmptyRow::None])),
    )
        .prop_map(|(operation, value, drop_empty_row)| ScoreMethod {
            value,
            operation,
            drop_empty_row,
        })
}

fn arb_assign_method() -> impl Strategy<Value = AssignMethod> {
    (
        any::<i32>(),
        prop_oneof![
            arb_label().prop_map(AssignOption::One),
            prop::collection::vec(arb_label(), 0..4).prop_map(AssignOption::Many),
        ],
    )
        .prop_map(|(value, option)| AssignMethod {
            value: value.into(),
            option,
        })
}

fn arb_rule() -> impl Strategy<Value = Rule> {
    (
        arb_data(),
        prop_oneof![
            Just(None),
            prop::collection::vec(arb_score_method(), 0..3).prop_map(|m| Some(RuleBody::Score(m))),
            prop::collection::vec(arb_assign_method(), 1..3).prop_map(|m| Some(RuleBody::Assign(m))),
        ],
    )
        .prop_map(|(data, body)| Rule { data, body })
}

fn arb_sort_order() -> impl Strategy<Value = SortOrder> {
    prop::sample::select(vec![SortOrder::Ascending, SortOrder::Descending])
}

fn arb_selection() -> impl Strategy<Value = Selection> {
    (
        arb_sort_order(),
        prop::collection::vec(
            (arb_data(), arb_sort_order()).prop_map(|(data, sort_order)| SortMethod { data, sort_order }),
            0..4,
        ),
    )
        .prop_map(|(sort_order, sort_method)| Selection {
            quantity: Quantity { sort_order },
            sort_method,
        })
}

fn arb_document() -> impl Strategy<Value = Document> {
    (
        prop::collection::vec(arb_rule(), 0..4),
        prop::collection::vec(arb_selection(), 0..3),
        prop::collection::vec(arb_score_method(), 0..3),
    )
        .prop_map(|(rules, selection, score_method)| Document {
            rules,
            selection,
            score_method,
        })
}

proptest! {
    #[test]
    fn import_of_export_is_identity(doc in arb_document()) {
        let mut source = DocumentStore::from_document(doc.clone());
        let exported = source.export();
        prop_assert_eq!(&exported, &doc);

        let raw = exported.to_value().unwrap();
        let mut target = DocumentStore::new();
        prop_assert!(target.import(&raw));
        prop_assert_eq!(target.export(), doc);

        // Importing into a non-empty store replaces, not merges.
        source.reset();
        prop_assert!(source.import(&raw));
        prop_assert_eq!(source.export(), target.export());
    }

    #[test]
    fn json_text_round_trip(doc in arb_document()) {
        let store = DocumentStore::from_document(doc);
        let mut target = DocumentStore::new();
        target.import_json(&store.export_json().unwrap()).unwrap();
        prop_assert_eq!(target.export(), store.export());
        prop_assert_eq!(target.digest().unwrap(), store.digest().unwrap());
    }

    #[test]
    fn validation_is_stable_across_round_trip(doc in arb_document()) {
        let store = DocumentStore::from_document(doc);
        let mut target = DocumentStore::new();
        prop_assert!(target.import(&store.export().to_value().unwrap()));
        prop_assert_eq!(target.validate(), store.validate());
    }

    #[test]
    fn move_sort_method_preserves_multiset(
        selection in arb_selection(),
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!selection.sort_method.is_empty());
        let len = selection.sort_method.len();
        let (from, to) = (from.index(len), to.index(len));

        let mut store = DocumentStore::new();
        store.add_selection(selection.clone());
        store.move_sort_method(0, from, to).unwrap();

        let moved = &store.document().selection[0].sort_method;
        prop_assert_eq!(moved.len(), len);
        prop_assert_eq!(&moved[to], &selection.sort_method[from]);
        for original in &selection.sort_method {
            let before = selection.sort_method.iter().filter(|m| *m == original).count();
            let after = moved.iter().filter(|m| *m == original).count();
            prop_assert_eq!(before, after);
        }
        prop_assert_eq!(store.document().selection[0].quantity, selection.quantity);
    }
}
