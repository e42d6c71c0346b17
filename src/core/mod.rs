pub mod catalog;
pub mod gpa;
pub mod gradebook;
pub mod keys;
pub mod normalize;
pub mod reconcile;

pub use crate::domain::model::{Row, RowEdit, RowKind, Totals};
pub use crate::domain::ports::SnapshotStore;
pub use crate::utils::error::Result;
