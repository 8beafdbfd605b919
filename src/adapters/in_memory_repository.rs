//! In-memory snapshot repository for testing.
//!
//! This adapter provides a pure in-memory implementation of SnapshotRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use crate::{Result, error::Error, ports::SnapshotRepository, q_learning::QTableSnapshot};

/// In-memory repository for testing.
///
/// Stores encoded snapshots in a shared HashMap. Clones share the same
/// storage, so a test can keep a handle while the agent owns another.
///
/// # Examples
///
/// ```
/// use snake_q::adapters::InMemoryRepository;
/// use snake_q::ports::SnapshotRepository;
/// use snake_q::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let table = QTable::new();
///
/// repo.save(&table.to_snapshot(), Path::new("q_table"))?;
/// let loaded = repo.load(Path::new("q_table"))?;
/// assert!(loaded.is_empty());
/// # Ok::<(), snake_q::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the number of snapshots currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Number of successful saves since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Clear all stored snapshots.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Make subsequent saves fail with an I/O error, simulating a full disk.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Store raw bytes at `path`, bypassing encoding.
    ///
    /// Useful for simulating corrupt snapshots.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage().insert(key_for(path), bytes);
    }
}

fn key_for(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl SnapshotRepository for InMemoryRepository {
    fn save(&self, snapshot: &QTableSnapshot, path: &Path) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Io {
                operation: format!("save snapshot to in-memory storage at {path:?}"),
                source: std::io::Error::other("simulated write failure"),
            });
        }

        let bytes = rmp_serde::to_vec(snapshot).map_err(|e| Error::SerializationContext {
            operation: "serialize snapshot for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key_for(path), bytes);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<QTableSnapshot> {
        let storage = self.storage();

        let bytes = storage.get(&key_for(path)).ok_or_else(|| Error::Io {
            operation: format!("load snapshot from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        let snapshot: QTableSnapshot =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize snapshot from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn exists(&self, path: &Path) -> bool {
        self.storage().contains_key(&key_for(path))
    }
}
