use crate::domain::grade::{self, UNGRADED};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseCategory {
    Core,
    Field,
    /// Elective-eligible.
    Neither,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDefinition {
    pub id: &'static str,
    pub title: Option<&'static str>,
    /// Allowed credit values; the first one is the default.
    pub credit_options: &'static [f64],
    pub category: CourseCategory,
}

impl CourseDefinition {
    pub const fn core(id: &'static str, title: &'static str, credit_options: &'static [f64]) -> Self {
        Self {
            id,
            title: Some(title),
            credit_options,
            category: CourseCategory::Core,
        }
    }

    pub const fn field(id: &'static str, title: &'static str, credit_options: &'static [f64]) -> Self {
        Self {
            id,
            title: Some(title),
            credit_options,
            category: CourseCategory::Field,
        }
    }

    pub const fn elective(id: &'static str, credit_options: &'static [f64]) -> Self {
        Self {
            id,
            title: None,
            credit_options,
            category: CourseCategory::Neither,
        }
    }

    pub fn is_core(&self) -> bool {
        self.category == CourseCategory::Core
    }

    pub fn is_field(&self) -> bool {
        self.category == CourseCategory::Field
    }

    pub fn is_elective_eligible(&self) -> bool {
        self.category == CourseCategory::Neither
    }

    pub fn default_credit(&self) -> Option<f64> {
        self.credit_options.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Core,
    Elective,
    Field,
}

impl RowKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "core" => Some(Self::Core),
            "elective" => Some(Self::Elective),
            "field" => Some(Self::Field),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Elective => "elective",
            Self::Field => "field",
        }
    }

    /// Prefix used for generated row keys.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Elective => "el",
            Self::Field => "field",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A graded enrollment record. Serialized field names match the persisted
/// snapshot layout (`key`, `kind`, `courseId`, `credit`, `grade`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub key: String,
    pub kind: RowKind,
    pub course_id: String,
    pub credit: f64,
    pub grade: String,
}

impl Row {
    pub fn ungraded(key: impl Into<String>, kind: RowKind, course_id: impl Into<String>, credit: f64) -> Self {
        Self {
            key: key.into(),
            kind,
            course_id: course_id.into(),
            credit,
            grade: UNGRADED.to_string(),
        }
    }

    pub fn is_graded(&self) -> bool {
        !self.grade.is_empty()
    }

    /// Letter-grade value; absent for field rows and ungraded rows.
    pub fn grade_value(&self) -> Option<f64> {
        if self.kind == RowKind::Field {
            return None;
        }
        grade::grade_value_of(&self.grade)
    }

    pub fn points(&self) -> Option<f64> {
        self.grade_value().map(|value| value * self.credit)
    }

    pub fn with_grade(&self, grade: &str) -> Self {
        Self {
            grade: grade::coerce_grade(self.kind, grade),
            ..self.clone()
        }
    }

    pub fn with_credit(&self, credit: f64) -> Self {
        Self {
            credit,
            ..self.clone()
        }
    }

    pub fn with_course(&self, course_id: impl Into<String>, credit: f64) -> Self {
        Self {
            course_id: course_id.into(),
            credit,
            ..self.clone()
        }
    }
}

/// Partial replacement applied to a row. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowEdit {
    pub credit: Option<f64>,
    pub grade: Option<String>,
    pub course_id: Option<String>,
}

impl RowEdit {
    pub fn grade(grade: impl Into<String>) -> Self {
        Self {
            grade: Some(grade.into()),
            ..Self::default()
        }
    }

    pub fn credit(credit: f64) -> Self {
        Self {
            credit: Some(credit),
            ..Self::default()
        }
    }

    pub fn course(course_id: impl Into<String>) -> Self {
        Self {
            course_id: Some(course_id.into()),
            ..Self::default()
        }
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_credit(mut self, credit: f64) -> Self {
        self.credit = Some(credit);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbationReason {
    CoreBelowMinimum,
    FieldUnsatisfactory,
    GpaBelowMinimum,
}

impl fmt::Display for ProbationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoreBelowMinimum => {
                write!(f, "at least one core grade is below {}", grade::CORE_MINIMUM_GRADE)
            }
            Self::FieldUnsatisfactory => write!(f, "a Field/Field Seminar grade is U"),
            Self::GpaBelowMinimum => {
                write!(f, "overall GPA is below {:.1}", grade::PROBATION_GPA)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Probation,
    GoodStanding,
    /// Nothing graded yet, or GPA not yet at the good-standing line.
    Undetermined,
}

/// Derived aggregate over a row set. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_credits_attempted: f64,
    pub gpa_credits: f64,
    pub points: f64,
    pub gpa: Option<f64>,
    pub core_violations: Vec<Row>,
    pub field_violations: Vec<Row>,
    pub gpa_violation: bool,
    pub on_probation: bool,
}

impl Totals {
    pub fn probation_reasons(&self) -> Vec<ProbationReason> {
        let mut reasons = Vec::new();
        if !self.core_violations.is_empty() {
            reasons.push(ProbationReason::CoreBelowMinimum);
        }
        if !self.field_violations.is_empty() {
            reasons.push(ProbationReason::FieldUnsatisfactory);
        }
        if self.gpa_violation {
            reasons.push(ProbationReason::GpaBelowMinimum);
        }
        reasons
    }

    pub fn standing(&self) -> Standing {
        if self.on_probation {
            Standing::Probation
        } else if self.gpa.is_some_and(|gpa| gpa >= grade::PROBATION_GPA) {
            Standing::GoodStanding
        } else {
            Standing::Undetermined
        }
    }

    pub fn formatted_gpa(&self) -> String {
        format_gpa(self.gpa)
    }
}

/// Three decimals, or an em dash when the GPA is not computable.
pub fn format_gpa(gpa: Option<f64>) -> String {
    match gpa {
        Some(value) if value.is_finite() => format!("{:.3}", value),
        _ => "—".to_string(),
    }
}
