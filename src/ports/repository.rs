//! Repository port for value-table persistence.
//!
//! This module defines the trait boundary between the agent and the storage
//! layer for snapshot storage and retrieval.

use std::path::Path;

use crate::{Result, q_learning::QTableSnapshot};

/// Port for persisting and loading value-table snapshots.
///
/// This trait abstracts the storage mechanism, allowing different implementations
/// (MessagePack, JSON, in-memory) without coupling the agent to a specific
/// serialization format.
///
/// # Examples
///
/// ```no_run
/// use snake_q::ports::SnapshotRepository;
/// use snake_q::q_learning::QTableSnapshot;
/// use std::path::Path;
///
/// fn save_snapshot<R: SnapshotRepository>(
///     repo: &R,
///     snapshot: &QTableSnapshot,
///     path: &Path,
/// ) -> snake_q::Result<()> {
///     repo.save(snapshot, path)
/// }
/// ```
pub trait SnapshotRepository {
    /// Save a snapshot, replacing whatever is stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be created or written to
    /// - Serialization fails
    fn save(&self, snapshot: &QTableSnapshot, path: &Path) -> Result<()>;

    /// Load a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing is stored at `path`
    /// - The stored bytes are corrupt or from an unsupported version
    fn load(&self, path: &Path) -> Result<QTableSnapshot>;

    /// Whether anything is stored at `path`.
    fn exists(&self, path: &Path) -> bool;
}
