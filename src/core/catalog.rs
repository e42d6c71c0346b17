use crate::domain::model::{CourseCategory, CourseDefinition, RowKind};
use crate::utils::error::{GpaError, Result};
use crate::utils::validation::{validate_credit, validate_unique, Validate};

/// Credit used when a course id is not in the catalog.
pub const DEFAULT_CREDIT: f64 = 3.0;

/// Sentinel course id for free-form electives.
pub const MANUAL_COURSE_ID: &str = "MANUAL";

pub const CORE_ORDER: [&str; 9] = ["500", "502", "503", "505", "506", "510", "520", "521", "542"];

pub const FIELD_ORDER: [&str; 6] = ["550", "551", "552", "553", "555 part 1", "555 part 2"];

const MANUAL_ENTRY: CourseDefinition = CourseDefinition {
    id: MANUAL_COURSE_ID,
    title: Some("Manual elective entry"),
    credit_options: &[1.0, 2.0, 3.0],
    category: CourseCategory::Neither,
};

/// MSW curriculum: GPA-bearing core, S/U field placements, then electives.
pub const STANDARD_COURSES: &[CourseDefinition] = &[
    CourseDefinition::core("500", "SW 500 Social Welfare History", &[3.0]),
    CourseDefinition::core("502", "SW 502 Social Welfare Policy", &[3.0]),
    CourseDefinition::core("503", "SW 503 Power, Privilege and Oppression", &[3.0]),
    CourseDefinition::core("505", "SW 505 Theories of Human Behavior and Development", &[3.0]),
    CourseDefinition::core("506", "SW 506 Theories of Organizational Behavior and Development", &[3.0]),
    CourseDefinition::core("510", "SW 510 Introduction to Social Work Research and Evaluation", &[3.0]),
    CourseDefinition::core("520", "SW 520 Interventions I", &[3.0]),
    CourseDefinition::core("521", "SW 521 Interventions II", &[3.0]),
    CourseDefinition::core("542", "SW 542 Perspectives on Trauma and Human Rights", &[3.0]),
    CourseDefinition::field("550", "SW 550 Field Instruction I", &[3.0]),
    CourseDefinition::field("551", "SW 551 Field Instruction II", &[4.0]),
    CourseDefinition::field("552", "SW 552 Field Instruction III", &[4.0]),
    CourseDefinition::field("553", "SW 553 Field Instruction IV", &[3.0]),
    CourseDefinition::field("555 part 1", "SW 555 Field Seminar (Part 1)", &[0.5]),
    CourseDefinition::field("555 part 2", "SW 555 Field Seminar (Part 2)", &[0.5]),
    CourseDefinition::elective("522", &[3.0]),
    CourseDefinition::elective("523", &[3.0]),
    CourseDefinition::elective("524", &[3.0]),
    CourseDefinition::elective("525", &[3.0]),
    CourseDefinition::elective("526", &[3.0]),
    CourseDefinition::elective("527", &[3.0]),
    CourseDefinition::elective("528", &[3.0]),
    CourseDefinition::elective("530", &[3.0]),
    CourseDefinition::elective("531", &[3.0]),
    CourseDefinition::elective("560", &[3.0]),
    CourseDefinition::elective("561", &[3.0]),
    CourseDefinition::elective("562", &[3.0]),
    CourseDefinition::elective("563", &[3.0]),
    CourseDefinition::elective("564", &[3.0]),
    CourseDefinition::elective("565", &[3.0]),
    CourseDefinition::elective("566", &[3.0]),
    CourseDefinition::elective("567", &[3.0]),
    CourseDefinition::elective("568", &[3.0]),
    CourseDefinition::elective("569", &[3.0]),
    CourseDefinition::elective("570", &[3.0]),
    CourseDefinition::elective("571", &[3.0]),
    CourseDefinition::elective("572", &[3.0]),
    CourseDefinition::elective("574", &[3.0]),
    CourseDefinition::elective("575", &[3.0]),
    CourseDefinition::elective("576", &[3.0]),
    CourseDefinition::elective("577", &[3.0]),
    CourseDefinition::elective("578", &[3.0]),
    CourseDefinition::elective("579", &[3.0]),
    CourseDefinition::elective("581", &[3.0]),
    CourseDefinition::elective("582", &[3.0]),
    CourseDefinition::elective("583", &[3.0]),
    CourseDefinition::elective("585", &[3.0]),
    CourseDefinition::elective("586", &[3.0]),
    CourseDefinition::elective("588", &[3.0]),
    CourseDefinition::elective("590", &[3.0]),
    CourseDefinition::elective("592", &[3.0]),
    CourseDefinition::elective("594", &[3.0]),
    CourseDefinition::elective("596", &[3.0]),
    CourseDefinition::elective("599", &[3.0]),
    CourseDefinition::elective("617", &[3.0]),
    CourseDefinition::elective("618", &[3.0]),
    CourseDefinition::elective("619", &[3.0]),
    CourseDefinition::elective("621", &[3.0]),
    CourseDefinition::elective("622", &[3.0]),
    CourseDefinition::elective("623", &[3.0]),
    CourseDefinition::elective("624", &[3.0]),
    CourseDefinition::elective("625", &[3.0]),
    CourseDefinition::elective("626", &[3.0]),
    CourseDefinition::elective("627", &[3.0]),
    CourseDefinition::elective("628", &[3.0]),
    CourseDefinition::elective("629", &[3.0]),
    CourseDefinition::elective("630", &[3.0]),
    CourseDefinition::elective("631", &[3.0]),
    CourseDefinition::elective("700", &[1.0, 2.0]),
    CourseDefinition::elective("703", &[2.0]),
    CourseDefinition::elective("704", &[2.0]),
    CourseDefinition::elective("705", &[2.0]),
    CourseDefinition::elective("706", &[3.0]),
    CourseDefinition::elective("554", &[3.0]),
    CourseDefinition::elective("556", &[3.0]),
    CourseDefinition::elective("557", &[3.0]),
    CourseDefinition::elective("559", &[3.0]),
    CourseDefinition::elective("573", &[3.0]),
    CourseDefinition::elective("580", &[3.0]),
    CourseDefinition::elective("584", &[3.0]),
    CourseDefinition::elective("587", &[3.0]),
    CourseDefinition::elective("589", &[3.0]),
    CourseDefinition::elective("591", &[3.0]),
    CourseDefinition::elective("593", &[3.0]),
    CourseDefinition::elective("595", &[3.0]),
    CourseDefinition::elective("597", &[3.0]),
    CourseDefinition::elective("598", &[3.0]),
    MANUAL_ENTRY,
];

/// Immutable registry of course definitions plus the canonical core/field
/// ordering.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    definitions: Vec<CourseDefinition>,
    core_order: Vec<&'static str>,
    field_order: Vec<&'static str>,
}

impl CourseCatalog {
    pub fn new(
        definitions: Vec<CourseDefinition>,
        core_order: Vec<&'static str>,
        field_order: Vec<&'static str>,
    ) -> Self {
        Self {
            definitions,
            core_order,
            field_order,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            STANDARD_COURSES.to_vec(),
            CORE_ORDER.to_vec(),
            FIELD_ORDER.to_vec(),
        )
    }

    pub fn lookup(&self, id: &str) -> Option<&CourseDefinition> {
        self.definitions.iter().find(|def| def.id == id)
    }

    /// First credit option of the definition, or [`DEFAULT_CREDIT`] for an
    /// unknown id.
    pub fn default_credit(&self, id: &str) -> f64 {
        self.lookup(id)
            .and_then(CourseDefinition::default_credit)
            .unwrap_or(DEFAULT_CREDIT)
    }

    pub fn definitions(&self) -> &[CourseDefinition] {
        &self.definitions
    }

    pub fn core_order(&self) -> &[&'static str] {
        &self.core_order
    }

    pub fn field_order(&self) -> &[&'static str] {
        &self.field_order
    }

    /// Courses selectable for a row of the given kind.
    pub fn options_for(&self, kind: RowKind) -> impl Iterator<Item = &CourseDefinition> {
        self.definitions.iter().filter(move |def| match kind {
            RowKind::Core => def.is_core(),
            RowKind::Field => def.is_field(),
            RowKind::Elective => def.is_elective_eligible(),
        })
    }

    /// Course a newly added elective starts on.
    pub fn first_elective_id(&self) -> &str {
        self.options_for(RowKind::Elective)
            .next()
            .map(|def| def.id)
            .unwrap_or(MANUAL_COURSE_ID)
    }

    pub fn label(def: &CourseDefinition) -> String {
        match def.title {
            Some(title) => title.to_string(),
            None => format!("SW {}", def.id),
        }
    }

    /// Display label for a course id, falling back to the raw id.
    pub fn label_for(&self, id: &str) -> String {
        self.lookup(id)
            .map(Self::label)
            .unwrap_or_else(|| id.to_string())
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Validate for CourseCatalog {
    fn validate(&self) -> Result<()> {
        validate_unique("catalog.id", self.definitions.iter().map(|def| def.id))?;

        for def in &self.definitions {
            if def.credit_options.is_empty() {
                return Err(GpaError::ValidationError {
                    field: "catalog.credit_options".to_string(),
                    value: def.id.to_string(),
                    reason: "Course must offer at least one credit value".to_string(),
                });
            }
            for credit in def.credit_options {
                validate_credit("catalog.credit_options", *credit)?;
            }
        }

        check_order(self, "catalog.core_order", &self.core_order, CourseCategory::Core)?;
        check_order(self, "catalog.field_order", &self.field_order, CourseCategory::Field)?;

        if let Some(manual) = self.lookup(MANUAL_COURSE_ID) {
            if !manual.is_elective_eligible() {
                return Err(GpaError::ValidationError {
                    field: "catalog.id".to_string(),
                    value: MANUAL_COURSE_ID.to_string(),
                    reason: "Manual entry must be elective-eligible".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_order(
    catalog: &CourseCatalog,
    field_name: &str,
    order: &[&'static str],
    category: CourseCategory,
) -> Result<()> {
    validate_unique(field_name, order.iter().copied())?;
    for id in order {
        match catalog.lookup(id) {
            Some(def) if def.category == category => {}
            Some(_) => {
                return Err(GpaError::ValidationError {
                    field: field_name.to_string(),
                    value: id.to_string(),
                    reason: format!("Course is not in the {:?} category", category),
                })
            }
            None => {
                return Err(GpaError::ValidationError {
                    field: field_name.to_string(),
                    value: id.to_string(),
                    reason: "Course is not defined in the catalog".to_string(),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        assert!(CourseCatalog::standard().validate().is_ok());
    }

    #[test]
    fn test_lookup_and_default_credit() {
        let catalog = CourseCatalog::standard();
        assert!(catalog.lookup("500").unwrap().is_core());
        assert!(catalog.lookup("551").unwrap().is_field());
        assert!(catalog.lookup("does-not-exist").is_none());

        assert_eq!(catalog.default_credit("551"), 4.0);
        assert_eq!(catalog.default_credit("555 part 1"), 0.5);
        assert_eq!(catalog.default_credit("700"), 1.0);
        assert_eq!(catalog.default_credit("unknown"), DEFAULT_CREDIT);
        assert_eq!(catalog.default_credit(MANUAL_COURSE_ID), 1.0);
    }

    #[test]
    fn test_options_for_kind() {
        let catalog = CourseCatalog::standard();
        assert_eq!(catalog.options_for(RowKind::Core).count(), CORE_ORDER.len());
        assert_eq!(catalog.options_for(RowKind::Field).count(), FIELD_ORDER.len());
        assert!(catalog
            .options_for(RowKind::Elective)
            .any(|def| def.id == MANUAL_COURSE_ID));
        assert_eq!(catalog.first_elective_id(), "522");
    }

    #[test]
    fn test_first_elective_falls_back_to_manual() {
        let catalog = CourseCatalog::new(
            vec![CourseDefinition::core("500", "SW 500", &[3.0])],
            vec!["500"],
            vec![],
        );
        assert_eq!(catalog.first_elective_id(), MANUAL_COURSE_ID);
    }

    #[test]
    fn test_labels() {
        let catalog = CourseCatalog::standard();
        assert_eq!(catalog.label_for("500"), "SW 500 Social Welfare History");
        assert_eq!(catalog.label_for("522"), "SW 522");
        assert_eq!(catalog.label_for(MANUAL_COURSE_ID), "Manual elective entry");
        assert_eq!(catalog.label_for("999"), "999");
    }

    #[test]
    fn test_validation_rejects_bad_catalogs() {
        let duplicate = CourseCatalog::new(
            vec![
                CourseDefinition::elective("522", &[3.0]),
                CourseDefinition::elective("522", &[3.0]),
            ],
            vec![],
            vec![],
        );
        assert!(duplicate.validate().is_err());

        let wrong_category = CourseCatalog::new(
            vec![CourseDefinition::elective("522", &[3.0])],
            vec!["522"],
            vec![],
        );
        assert!(wrong_category.validate().is_err());

        let missing = CourseCatalog::new(vec![], vec![], vec!["550"]);
        assert!(missing.validate().is_err());

        let no_credits = CourseCatalog::new(
            vec![CourseDefinition::elective("522", &[])],
            vec![],
            vec![],
        );
        assert!(no_credits.validate().is_err());

        let negative = CourseCatalog::new(
            vec![CourseDefinition::elective("522", &[-1.0])],
            vec![],
            vec![],
        );
        assert!(negative.validate().is_err());
    }
}
