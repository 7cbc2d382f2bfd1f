//! Property tests for row partitioning.

use proptest::prelude::*;
use rowgate_model::{Column, ColumnType, RawDataset, RuleSet, Value};
use rowgate_validate::{check_schema, validate_rows};

fn age_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (-20i64..140).prop_map(|v| Value::Float(v as f64)),
        (-20.0f64..140.0).prop_map(Value::Float),
    ]
}

fn survived_value() -> impl Strategy<Value = Value> {
    prop_oneof![Just(Value::Null), (-2i64..4).prop_map(Value::Int)]
}

fn dataset(rows: Vec<(Value, Value)>) -> RawDataset {
    RawDataset::new(
        vec![
            Column::new("Age", ColumnType::Float),
            Column::new("Survived", ColumnType::Integer),
        ],
        rows.into_iter().map(|(a, s)| vec![a, s]).collect(),
    )
}

proptest! {
    #[test]
    fn every_row_lands_in_exactly_one_partition(
        rows in prop::collection::vec((age_value(), survived_value()), 0..64)
    ) {
        let ds = dataset(rows);
        let bound = check_schema(&ds, &RuleSet::titanic()).unwrap();
        let partition = validate_rows(&ds, &bound.bindings);

        prop_assert_eq!(partition.accepted.len() + partition.rejections.len(), ds.height());

        let mut numbers: Vec<usize> = partition
            .accepted
            .iter()
            .map(|r| r.row_number)
            .chain(partition.rejections.iter().map(|r| r.row_number))
            .collect();
        numbers.sort_unstable();
        let expected: Vec<usize> = (2..ds.height() + 2).collect();
        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn outputs_keep_input_order(
        rows in prop::collection::vec((age_value(), survived_value()), 0..64)
    ) {
        let ds = dataset(rows);
        let bound = check_schema(&ds, &RuleSet::titanic()).unwrap();
        let partition = validate_rows(&ds, &bound.bindings);

        prop_assert!(partition.accepted.windows(2).all(|w| w[0].row_number < w[1].row_number));
        prop_assert!(partition.rejections.windows(2).all(|w| w[0].row_number < w[1].row_number));
    }

    #[test]
    fn missing_values_never_reject(survived in survived_value()) {
        let ds = dataset(vec![(Value::Null, survived.clone())]);
        let bound = check_schema(&ds, &RuleSet::titanic()).unwrap();
        let partition = validate_rows(&ds, &bound.bindings);
        let flag_ok = matches!(survived, Value::Null | Value::Int(0) | Value::Int(1));
        prop_assert_eq!(partition.accepted.len(), usize::from(flag_ok));
        if flag_ok {
            prop_assert_eq!(&partition.accepted[0].values[0], &Value::Null);
        }
    }
}
