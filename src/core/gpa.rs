use crate::domain::grade::{self, CORE_MINIMUM_GRADE, PROBATION_GPA, UNSATISFACTORY};
use crate::domain::model::{Row, RowKind, Totals};

/// Aggregates a row set into GPA and probation signals.
///
/// Field rows count toward attempted credits only; S/U never reaches the
/// GPA. Ungraded rows contribute nothing, and an ungraded row is distinct
/// from an F. With no graded letter rows the GPA is `None`.
pub fn compute_totals(rows: &[Row]) -> Totals {
    let mut total_credits_attempted = 0.0;
    let mut gpa_credits = 0.0;
    let mut points = 0.0;

    for row in rows {
        total_credits_attempted += row.credit;

        if row.kind == RowKind::Field || !row.is_graded() {
            continue;
        }
        let Some(value) = grade::grade_value_of(&row.grade) else {
            continue;
        };

        gpa_credits += row.credit;
        points += row.credit * value;
    }

    let gpa = if gpa_credits > 0.0 {
        Some(points / gpa_credits)
    } else {
        None
    };

    let core_violations: Vec<Row> = rows
        .iter()
        .filter(|row| row.kind == RowKind::Core && row.is_graded())
        .filter(|row| grade::is_below_threshold(&row.grade, CORE_MINIMUM_GRADE))
        .cloned()
        .collect();

    let field_violations: Vec<Row> = rows
        .iter()
        .filter(|row| row.kind == RowKind::Field && row.grade == UNSATISFACTORY)
        .cloned()
        .collect();

    let gpa_violation = gpa.is_some_and(|gpa| gpa < PROBATION_GPA);
    let on_probation = !core_violations.is_empty() || !field_violations.is_empty() || gpa_violation;

    Totals {
        total_credits_attempted,
        gpa_credits,
        points,
        gpa,
        core_violations,
        field_violations,
        gpa_violation,
        on_probation,
    }
}
