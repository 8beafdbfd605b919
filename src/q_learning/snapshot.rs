//! On-disk representation of a value table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::{Heading, State},
};

/// One `(state, action) -> value` binding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub state: State,
    pub action: Heading,
    pub value: f64,
}

/// A full copy of the value table as a flat list of bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTableSnapshot {
    pub version: u32,
    pub entries: Vec<SnapshotEntry>,
}

impl QTableSnapshot {
    pub const VERSION: u32 = 1;

    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self {
            version: Self::VERSION,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject snapshots written by an incompatible version.
    pub fn check_version(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }
}

/// Encoding used for snapshot files.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotFormat {
    /// Compact MessagePack binary
    #[default]
    #[serde(rename = "msgpack")]
    #[value(name = "msgpack")]
    MsgPack,
    /// Pretty-printed JSON
    Json,
}

impl SnapshotFormat {
    /// Infer the format from a file extension; anything but `.json` is MessagePack.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::MsgPack,
        }
    }
}
