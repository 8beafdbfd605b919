//! JSON implementation of the snapshot repository.
//!
//! Human-readable alternative to MessagePack, handy for inspecting a trained
//! table by hand.

use std::path::Path;

use super::atomic::{read_all, write_atomic};
use crate::{Result, ports::SnapshotRepository, q_learning::QTableSnapshot};

/// JSON-based snapshot repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotRepository for JsonRepository {
    fn save(&self, snapshot: &QTableSnapshot, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        write_atomic(path, &bytes)
    }

    fn load(&self, path: &Path) -> Result<QTableSnapshot> {
        let bytes = read_all(path)?;
        let snapshot: QTableSnapshot = serde_json::from_slice(&bytes)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
