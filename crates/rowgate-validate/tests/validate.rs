//! Integration tests for dataset validation.

use rowgate_model::{
    Column, ColumnType, FieldRule, MissingPolicy, RawDataset, RuleSet, Value, ViolatedRule,
};
use rowgate_validate::{ValidateError, validate_dataset};

fn manifest(rows: Vec<(&str, Option<f64>, Option<i64>)>) -> RawDataset {
    RawDataset::new(
        vec![
            Column::new("name", ColumnType::Text),
            Column::new("age", ColumnType::Float),
            Column::new("survived", ColumnType::Integer),
        ],
        rows.into_iter()
            .map(|(name, age, survived)| vec![Value::from(name), age.into(), survived.into()])
            .collect(),
    )
}

#[test]
fn four_passenger_example() {
    let ds = manifest(vec![
        ("A", Some(29.0), Some(1)),
        ("B", Some(-5.0), Some(0)),
        ("C", Some(f64::NAN), Some(1)),
        ("D", Some(30.0), Some(2)),
    ]);

    let outcome = validate_dataset(&ds, &RuleSet::titanic()).unwrap();

    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(
        outcome.accepted[0].values,
        vec![Value::from("A"), Value::Float(29.0), Value::Int(1)]
    );
    assert_eq!(
        outcome.accepted[1].values,
        vec![Value::from("C"), Value::Null, Value::Int(1)]
    );
    assert_eq!(outcome.accepted[1].row_number, 4);

    let warnings: Vec<String> = outcome.rejections.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(warnings.join("\n"), @r"
    Row 3: Invalid age value '-5' (must be 0-120). Skipping row.
    Row 5: Invalid survived value '2' (must be 0 or 1). Skipping row.
    ");
}

#[test]
fn range_boundaries() {
    let ds = manifest(vec![
        ("lo", Some(0.0), Some(0)),
        ("hi", Some(120.0), Some(1)),
        ("below", Some(-1.0), Some(0)),
        ("above", Some(121.0), Some(1)),
    ]);

    let outcome = validate_dataset(&ds, &RuleSet::titanic()).unwrap();
    let accepted: Vec<usize> = outcome.accepted.iter().map(|r| r.row_number).collect();
    let rejected: Vec<usize> = outcome.rejections.iter().map(|r| r.row_number).collect();
    assert_eq!(accepted, vec![2, 3]);
    assert_eq!(rejected, vec![4, 5]);
}

#[test]
fn float_flag_values_match_integer_set() {
    let ds = RawDataset::new(
        vec![
            Column::new("Age", ColumnType::Float),
            Column::new("Survived", ColumnType::Float),
        ],
        vec![
            vec![Value::Float(20.0), Value::Float(1.0)],
            vec![Value::Float(20.0), Value::Float(0.0)],
            vec![Value::Float(20.0), Value::Float(2.0)],
            vec![Value::Float(20.0), Value::Float(0.5)],
        ],
    );

    let outcome = validate_dataset(&ds, &RuleSet::titanic()).unwrap();
    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(outcome.rejections.len(), 2);
    assert!(
        outcome
            .rejections
            .iter()
            .all(|r| r.column == "Survived" && matches!(r.rule, ViolatedRule::Constraint(_)))
    );
}

#[test]
fn missing_column_fails_before_rows() {
    let ds = RawDataset::new(
        vec![
            Column::new("Name", ColumnType::Text),
            Column::new("Age", ColumnType::Float),
        ],
        vec![vec![Value::from("A"), Value::Float(500.0)]],
    );

    let err = validate_dataset(&ds, &RuleSet::titanic()).unwrap_err();
    match err {
        ValidateError::MissingColumns { missing, available } => {
            assert_eq!(missing, vec!["survived"]);
            assert_eq!(available, vec!["Name", "Age"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn all_rows_rejected_is_fatal() {
    let ds = manifest(vec![("X", Some(200.0), Some(1)), ("Y", Some(10.0), Some(3))]);
    let err = validate_dataset(&ds, &RuleSet::titanic()).unwrap_err();
    assert!(matches!(err, ValidateError::NoAcceptedRows { rejected: 2 }));
}

#[test]
fn custom_rules_apply_in_declared_order() {
    let ds = RawDataset::new(
        vec![
            Column::new("Pclass", ColumnType::Integer),
            Column::new("Fare", ColumnType::Float),
        ],
        vec![
            vec![Value::Null, Value::Float(-1.0)],
            vec![Value::Int(2), Value::Float(-1.0)],
            vec![Value::Int(3), Value::Float(8.05)],
        ],
    );
    let rules = RuleSet::new(vec![
        FieldRule::new("pclass")
            .with_missing(MissingPolicy::Reject)
            .one_of([1, 2, 3]),
        FieldRule::new("fare").range(0.0, 600.0),
    ])
    .unwrap();

    let outcome = validate_dataset(&ds, &rules).unwrap();
    assert_eq!(outcome.accepted.len(), 1);
    assert_eq!(outcome.rejections[0].rule, ViolatedRule::Missing);
    assert_eq!(outcome.rejections[1].column, "Fare");
}
