pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::storage::{LocalStorage, MemoryStorage};
pub use crate::config::GradebookConfig;
pub use crate::core::{
    catalog::CourseCatalog, gpa::compute_totals, gradebook::GradeBook, normalize::normalize,
    reconcile::reconcile,
};
pub use crate::domain::model::{format_gpa, Row, RowEdit, RowKind, Totals};
pub use crate::utils::error::{GpaError, Result};
