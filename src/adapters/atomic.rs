//! Write-then-rename helper shared by the file-backed repositories.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{Result, error::Error};

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to a sibling temporary file, sync it and rename it over `path`.
///
/// A failure at any point leaves a previous file at `path` untouched.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if let Err(source) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::Io {
            operation: format!("write snapshot to {path:?}"),
            source,
        });
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Atomically wrote snapshot");
    Ok(())
}

pub(crate) fn read_all(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        operation: format!("open file {path:?}"),
        source,
    })
}
