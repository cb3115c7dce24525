//! File persistence helpers with locking.
//!
//! Reads take a shared lock and never fail hard: any problem is logged and
//! reported as "nothing stored". Writes are atomic (temp file in the same
//! directory, fsync, rename). Read-modify-write cycles hold a [`WriteLock`]
//! on a `<file>.lock` sidecar so concurrent writers don't drop each other's
//! changes.

use crate::{Error, Result};
use fs2::FileExt;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Read a whole file under a shared lock
///
/// Returns `None` if the file doesn't exist or can't be opened, locked or
/// read. Callers treat `None` as empty storage.
pub(crate) fn read_locked(path: &Path) -> Option<String> {
    if !path.exists() {
        tracing::debug!("No file at {:?}", path);
        return None;
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Unable to open {:?}: {}. Treating as empty.", path, e);
            return None;
        }
    };

    if let Err(e) = file.lock_shared() {
        tracing::warn!("Unable to lock {:?}: {}. Treating as empty.", path, e);
        return None;
    }

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    let read = reader.read_to_string(&mut contents);
    let _ = file.unlock();

    match read {
        Ok(_) => Some(contents),
        Err(e) => {
            tracing::warn!("Failed to read {:?}: {}. Treating as empty.", path, e);
            None
        }
    }
}

/// Serialize `value` as JSON and atomically replace `path` with it
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "path missing parent")
    })?;
    // Bare file names have an empty parent
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string_pretty(value)?;
        writer.write_all(contents.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

/// Exclusive lock on the `<path>.lock` sidecar, released on drop
///
/// The data file itself is replaced by rename on every save, so it can't
/// carry the lock.
#[derive(Debug)]
pub(crate) struct WriteLock {
    file: File,
}

impl WriteLock {
    /// Block until the lock for `path` is held
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let lock_path = lock_path_for(path);
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()?;

        tracing::debug!("Acquired write lock {:?}", lock_path);
        Ok(Self { file })
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

pub(crate) fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}
