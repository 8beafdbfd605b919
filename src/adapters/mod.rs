//! Adapters implementing core ports.
//!
//! Storage back ends for value-table snapshots. Adapters depend on the ports,
//! not the other way around.

mod atomic;
pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

use std::sync::Arc;

pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::{ports::SnapshotRepository, q_learning::SnapshotFormat};

/// File-backed repository for the given format.
pub fn repository_for(format: SnapshotFormat) -> Arc<dyn SnapshotRepository + Send + Sync> {
    match format {
        SnapshotFormat::MsgPack => Arc::new(MsgPackRepository::new()),
        SnapshotFormat::Json => Arc::new(JsonRepository::new()),
    }
}
