//! Grade scale and the per-kind grade option sets.
//!
//! Threshold policy lives here so normalization and GPA aggregation agree on
//! what counts as a valid grade and what counts as "below B-".

use crate::domain::model::RowKind;

/// Fixed letter-grade scale, best first.
pub const GRADE_SCALE: [(&str, f64); 11] = [
    ("A", 4.00),
    ("A-", 3.67),
    ("B+", 3.33),
    ("B", 3.00),
    ("B-", 2.67),
    ("C+", 2.33),
    ("C", 2.00),
    ("C-", 1.67),
    ("D+", 1.33),
    ("D", 1.00),
    ("F", 0.00),
];

pub const LETTER_GRADE_OPTIONS: [&str; 12] =
    ["", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "F"];

pub const SU_GRADE_OPTIONS: [&str; 3] = ["", "S", "U"];

pub const UNGRADED: &str = "";
pub const SATISFACTORY: &str = "S";
pub const UNSATISFACTORY: &str = "U";

/// Core grades strictly below this letter trigger probation.
pub const CORE_MINIMUM_GRADE: &str = "B-";

/// Overall GPA strictly below this value triggers probation.
pub const PROBATION_GPA: f64 = 3.0;

pub fn grade_value_of(letter: &str) -> Option<f64> {
    GRADE_SCALE
        .iter()
        .find(|(grade, _)| *grade == letter)
        .map(|(_, value)| *value)
}

/// False when either grade is not on the letter scale.
pub fn is_below_threshold(letter: &str, threshold_letter: &str) -> bool {
    match (grade_value_of(letter), grade_value_of(threshold_letter)) {
        (Some(value), Some(threshold)) => value < threshold,
        _ => false,
    }
}

pub fn allowed_grades(kind: RowKind) -> &'static [&'static str] {
    match kind {
        RowKind::Field => &SU_GRADE_OPTIONS,
        RowKind::Core | RowKind::Elective => &LETTER_GRADE_OPTIONS,
    }
}

pub fn is_allowed_grade(kind: RowKind, grade: &str) -> bool {
    allowed_grades(kind).contains(&grade)
}

/// Returns `grade` if it belongs to `kind`'s option set, otherwise the
/// ungraded marker.
pub fn coerce_grade(kind: RowKind, grade: &str) -> String {
    if is_allowed_grade(kind, grade) {
        grade.to_string()
    } else {
        UNGRADED.to_string()
    }
}
