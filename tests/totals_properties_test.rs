use gpa_ledger::core::catalog::{CORE_ORDER, FIELD_ORDER};
use gpa_ledger::domain::model::{ProbationReason, Standing};
use gpa_ledger::{compute_totals, normalize, reconcile, CourseCatalog, Row, RowKind};
use serde_json::json;

fn row(kind: RowKind, course_id: &str, credit: f64, grade: &str) -> Row {
    Row {
        key: format!("{}-{}", kind, course_id),
        kind,
        course_id: course_id.to_string(),
        credit,
        grade: grade.to_string(),
    }
}

#[test]
fn test_graded_transcript_in_good_standing() {
    let rows = vec![
        row(RowKind::Core, "500", 3.0, "A"),
        row(RowKind::Core, "502", 3.0, "A-"),
        row(RowKind::Core, "503", 3.0, "B+"),
        row(RowKind::Elective, "700", 1.0, "B"),
        row(RowKind::Field, "550", 3.0, "S"),
        row(RowKind::Field, "555 part 1", 0.5, "S"),
    ];
    let totals = compute_totals(&rows);

    assert_eq!(totals.total_credits_attempted, 13.5);
    assert_eq!(totals.gpa_credits, 10.0);
    let expected = (12.0 + 11.01 + 9.99 + 3.0) / 10.0;
    assert!((totals.gpa.unwrap() - expected).abs() < 1e-9);
    assert_eq!(totals.standing(), Standing::GoodStanding);
    assert!(totals.probation_reasons().is_empty());
}

#[test]
fn test_all_three_triggers_reported_in_order() {
    let rows = vec![
        row(RowKind::Core, "500", 3.0, "D"),
        row(RowKind::Field, "551", 4.0, "U"),
    ];
    let totals = compute_totals(&rows);
    assert_eq!(
        totals.probation_reasons(),
        vec![
            ProbationReason::CoreBelowMinimum,
            ProbationReason::FieldUnsatisfactory,
            ProbationReason::GpaBelowMinimum,
        ]
    );
    assert_eq!(totals.standing(), Standing::Probation);
}

#[test]
fn test_exactly_three_point_oh_is_not_a_violation() {
    let totals = compute_totals(&[row(RowKind::Core, "500", 3.0, "B")]);
    assert_eq!(totals.gpa, Some(3.0));
    assert!(!totals.gpa_violation);
    assert!(!totals.on_probation);
}

#[test]
fn test_reconciled_then_normalized_rows_are_stable() {
    let catalog = CourseCatalog::standard();
    let raw = json!([
        {"key": "c", "kind": "core", "courseId": "521", "credit": 3, "grade": "C"},
        {"key": "e", "kind": "elective", "courseId": "MANUAL", "credit": 2.5, "grade": "A"}
    ]);
    let candidates: Vec<Row> = raw.as_array().unwrap().iter().map(normalize).collect();
    let rows = reconcile(&catalog, &candidates, &CORE_ORDER, &FIELD_ORDER);

    let renormalized: Vec<Row> = rows
        .iter()
        .map(|r| normalize(&serde_json::to_value(r).unwrap()))
        .collect();
    assert_eq!(renormalized, rows);
    assert_eq!(
        reconcile(&catalog, &renormalized, &CORE_ORDER, &FIELD_ORDER),
        rows
    );

    let totals = compute_totals(&rows);
    assert_eq!(totals.core_violations.len(), 1);
    assert_eq!(totals.core_violations[0].key, "c");
}

#[test]
fn test_totals_serialize_with_camel_case_fields() {
    let totals = compute_totals(&[row(RowKind::Field, "551", 4.0, "U")]);
    let value = serde_json::to_value(&totals).unwrap();
    assert_eq!(value["totalCreditsAttempted"], json!(4.0));
    assert_eq!(value["gpa"], json!(null));
    assert_eq!(value["onProbation"], json!(true));
    assert_eq!(value["fieldViolations"][0]["courseId"], json!("551"));
}
