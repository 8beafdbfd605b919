//! MessagePack implementation of the snapshot repository.
//!
//! This adapter implements the SnapshotRepository port using rmp_serde for
//! compact binary serialization.

use std::path::Path;

use super::atomic::{read_all, write_atomic};
use crate::{Result, error::Error, ports::SnapshotRepository, q_learning::QTableSnapshot};

/// MessagePack-based snapshot repository.
///
/// This is the default storage format.
///
/// # Examples
///
/// ```no_run
/// use snake_q::adapters::MsgPackRepository;
/// use snake_q::ports::SnapshotRepository;
/// use snake_q::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let table = QTable::new();
///
/// repo.save(&table.to_snapshot(), Path::new("q_table.msgpack"))?;
/// let loaded = repo.load(Path::new("q_table.msgpack"))?;
/// # Ok::<(), snake_q::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotRepository for MsgPackRepository {
    fn save(&self, snapshot: &QTableSnapshot, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(snapshot).map_err(|e| Error::SerializationContext {
            operation: "serialize snapshot to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        write_atomic(path, &bytes)
    }

    fn load(&self, path: &Path) -> Result<QTableSnapshot> {
        let bytes = read_all(path)?;

        let snapshot: QTableSnapshot =
            rmp_serde::from_slice(&bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize snapshot from MessagePack".to_string(),
                message: e.to_string(),
            })?;
        snapshot.check_version()?;

        Ok(snapshot)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
