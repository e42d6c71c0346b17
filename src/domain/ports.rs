use crate::domain::model::Row;
use crate::utils::error::Result;
use serde_json::Value;

/// Raw load/save of the persisted row snapshot.
///
/// `load` returns the untyped document as stored; it is only ever trusted
/// after it has passed through normalization. Callers treat every method as
/// best-effort.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<Value>>;
    fn save(&self, rows: &[Row]) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self) -> Result<Option<Value>> {
        (**self).load()
    }

    fn save(&self, rows: &[Row]) -> Result<()> {
        (**self).save(rows)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
