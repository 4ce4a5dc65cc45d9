//! Storage backends for the encoded history document.
//!
//! The store hands whole documents to a [`HistoryStorage`]; backends only
//! move bytes. The file backend reads under a shared lock and replaces the
//! file with an atomic rename, so a crash mid-write never leaves a truncated
//! document. Two processes saving at once do not merge: the last one wins.

use crate::{Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Durable home of the encoded history document
pub trait HistoryStorage {
    /// Read the stored document; `Ok(None)` when nothing was ever saved
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored document
    fn save(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Single JSON file on disk
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            tracing::info!("No history file at {:?}", self.path);
            return Ok(None);
        }

        let file = File::open(&self.path)?;

        // Shared lock so we never read a file another process is rewriting in place
        file.lock_shared()?;

        let mut bytes = Vec::new();
        let read = std::io::BufReader::new(&file).read_to_end(&mut bytes);
        file.unlock()?;
        read?;

        tracing::debug!("Read {} bytes of history from {:?}", bytes.len(), self.path);
        Ok(Some(bytes))
    }

    /// Atomically writes the document by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        // Readers never see a partial document; concurrent writers are not
        // serialized and the last rename wins.
        let temp = NamedTempFile::new_in(parent)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(bytes)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} bytes of history to {:?}", bytes.len(), self.path);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryCell {
    bytes: Option<Vec<u8>>,
    fail_writes: bool,
}

/// In-process backend. Clones share one buffer, so a test can keep a handle
/// and inspect what the store wrote or reopen a second store on it.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    cell: Arc<Mutex<MemoryCell>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already stored document
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        storage.lock().bytes = Some(bytes.into());
        storage
    }

    /// Make every subsequent `save` fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Copy of the last saved document
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.lock().bytes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryCell> {
        // A poisoned cell still holds a consistent Option<Vec<u8>>
        self.cell.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.lock().bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        let mut cell = self.lock();
        if cell.fail_writes {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory storage is read-only",
            )));
        }
        cell.bytes = Some(bytes.to_vec());
        Ok(())
    }
}
