use crate::config::StorageConfig;
use crate::domain::model::Row;
use crate::domain::ports::SnapshotStore;
use crate::utils::error::{GpaError, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot stored as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    file_name: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            file_name: file_name.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.directory, &config.snapshot_file)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(&self.file_name)
    }
}

impl SnapshotStore for LocalStorage {
    fn load(&self) -> Result<Option<Value>> {
        let full_path = self.snapshot_path();
        let data = match fs::read(&full_path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let value = serde_json::from_slice(&data)?;
        Ok(Some(value))
    }

    fn save(&self, rows: &[Row]) -> Result<()> {
        let full_path = self.snapshot_path();

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec(rows)?;
        fs::write(full_path, data)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(self.snapshot_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process snapshot holder, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: RefCell<Option<Value>>,
    save_count: RefCell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Value) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot)),
            save_count: RefCell::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<Value> {
        self.snapshot.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.save_count.borrow()
    }
}

impl SnapshotStore for MemoryStorage {
    fn load(&self) -> Result<Option<Value>> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, rows: &[Row]) -> Result<()> {
        let value = serde_json::to_value(rows)?;
        *self.snapshot.borrow_mut() = Some(value);
        *self.save_count.borrow_mut() += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.snapshot.borrow_mut() = None;
        Ok(())
    }
}

/// Store whose every operation fails. Used to exercise the best-effort
/// persistence path.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl SnapshotStore for UnavailableStorage {
    fn load(&self) -> Result<Option<Value>> {
        Err(GpaError::StorageError {
            message: "storage is unavailable".to_string(),
        })
    }

    fn save(&self, _rows: &[Row]) -> Result<()> {
        Err(GpaError::StorageError {
            message: "storage is unavailable".to_string(),
        })
    }

    fn clear(&self) -> Result<()> {
        Err(GpaError::StorageError {
            message: "storage is unavailable".to_string(),
        })
    }
}
