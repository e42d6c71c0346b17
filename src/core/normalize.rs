//! Sole entry point for untrusted persisted rows.
//!
//! `normalize` never fails: every field that is missing, mistyped, or out of
//! domain is coerced to a safe default so that downstream code only ever
//! sees rows that satisfy the row invariants.

use crate::core::catalog::{DEFAULT_CREDIT, MANUAL_COURSE_ID};
use crate::core::keys::fresh_key;
use crate::domain::grade;
use crate::domain::model::{Row, RowKind};
use serde_json::Value;

pub fn normalize(raw: &Value) -> Row {
    let kind = raw
        .get("kind")
        .and_then(Value::as_str)
        .and_then(RowKind::parse)
        .unwrap_or(RowKind::Core);

    let course_id = match raw.get("courseId").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => {
            tracing::debug!("Row without a string courseId, using manual entry");
            MANUAL_COURSE_ID.to_string()
        }
    };

    // serde_json cannot hold NaN/inf, but a negative credit still breaks
    // the row invariant.
    let credit = raw
        .get("credit")
        .and_then(Value::as_f64)
        .filter(|credit| credit.is_finite() && *credit >= 0.0)
        .unwrap_or(DEFAULT_CREDIT);

    let grade = match raw.get("grade").and_then(Value::as_str) {
        Some(candidate) if grade::is_allowed_grade(kind, candidate) => candidate.to_string(),
        Some(candidate) => {
            tracing::debug!(
                "Dropping grade '{}' not valid for {} row {}",
                candidate,
                kind,
                course_id
            );
            grade::UNGRADED.to_string()
        }
        None => grade::UNGRADED.to_string(),
    };

    let key = raw
        .get("key")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fresh_key("row"));

    Row {
        key,
        kind,
        course_id,
        credit,
        grade,
    }
}

/// Normalizes a whole persisted document.
///
/// Returns `None` when the document is not an array. Array entries that are
/// not objects are skipped.
pub fn normalize_snapshot(raw: &Value) -> Option<Vec<Row>> {
    let entries = raw.as_array()?;
    let rows: Vec<Row> = entries
        .iter()
        .filter(|entry| entry.is_object())
        .map(normalize)
        .collect();

    if rows.len() != entries.len() {
        tracing::debug!(
            "Skipped {} non-object snapshot entries",
            entries.len() - rows.len()
        );
    }
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_row_is_fixed_point() {
        let row = Row {
            key: "k1".to_string(),
            kind: RowKind::Elective,
            course_id: "522".to_string(),
            credit: 1.5,
            grade: "C-".to_string(),
        };
        let raw = serde_json::to_value(&row).unwrap();
        assert_eq!(normalize(&raw), row);
    }

    #[test]
    fn test_fixed_point_across_kinds_and_grades() {
        for kind in [RowKind::Core, RowKind::Elective, RowKind::Field] {
            for grade in grade::allowed_grades(kind) {
                let row = Row {
                    key: format!("{}-{}", kind, grade),
                    kind,
                    course_id: "x".to_string(),
                    credit: 0.5,
                    grade: grade.to_string(),
                };
                let raw = serde_json::to_value(&row).unwrap();
                assert_eq!(normalize(&raw), row);
            }
        }
    }

    #[test]
    fn test_unknown_kind_coerces_to_core() {
        assert_eq!(normalize(&json!({"kind": "lab"})).kind, RowKind::Core);
        assert_eq!(normalize(&json!({"kind": 7})).kind, RowKind::Core);
        assert_eq!(normalize(&json!({})).kind, RowKind::Core);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let row = normalize(&json!({}));
        assert_eq!(row.course_id, MANUAL_COURSE_ID);
        assert_eq!(row.credit, DEFAULT_CREDIT);
        assert_eq!(row.grade, "");
        assert!(row.key.starts_with("row_"));
    }

    #[test]
    fn test_non_object_input_still_yields_row() {
        for raw in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let row = normalize(&raw);
            assert_eq!(row.kind, RowKind::Core);
            assert_eq!(row.course_id, MANUAL_COURSE_ID);
        }
    }

    #[test]
    fn test_mistyped_fields_are_coerced() {
        let row = normalize(&json!({
            "key": 12,
            "kind": "elective",
            "courseId": 522,
            "credit": "3",
            "grade": ["A"]
        }));
        assert_eq!(row.kind, RowKind::Elective);
        assert_eq!(row.course_id, MANUAL_COURSE_ID);
        assert_eq!(row.credit, DEFAULT_CREDIT);
        assert_eq!(row.grade, "");
        assert!(row.key.starts_with("row_"));
    }

    #[test]
    fn test_negative_credit_is_coerced() {
        let row = normalize(&json!({"kind": "core", "courseId": "500", "credit": -2}));
        assert_eq!(row.credit, DEFAULT_CREDIT);
    }

    #[test]
    fn test_grade_checked_against_resolved_kind() {
        let field = normalize(&json!({"kind": "field", "courseId": "550", "grade": "A"}));
        assert_eq!(field.grade, "");

        let core = normalize(&json!({"kind": "core", "courseId": "500", "grade": "S"}));
        assert_eq!(core.grade, "");

        // Unknown kind resolves to core, so letter grades survive.
        let legacy = normalize(&json!({"kind": "required", "courseId": "500", "grade": "B+"}));
        assert_eq!(legacy.grade, "B+");

        let typo = normalize(&json!({"kind": "core", "courseId": "500", "grade": "b+"}));
        assert_eq!(typo.grade, "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let row = normalize(&json!({
            "key": "k",
            "kind": "field",
            "courseId": "551",
            "credit": 4,
            "grade": "U",
            "term": "Fall 2024"
        }));
        assert_eq!(row.grade, "U");
        assert_eq!(row.credit, 4.0);
    }

    #[test]
    fn test_normalize_snapshot() {
        assert!(normalize_snapshot(&json!({"rows": []})).is_none());
        assert!(normalize_snapshot(&json!("nope")).is_none());

        let rows = normalize_snapshot(&json!([
            {"key": "a", "kind": "core", "courseId": "500", "credit": 3, "grade": "A"},
            null,
            7,
            {"key": "b", "kind": "elective", "courseId": "522", "credit": 3, "grade": ""}
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "a");
        assert_eq!(rows[1].key, "b");
    }
}
