//! File-backed key-value store.
//!
//! The whole map lives in one JSON object file. It is read once at
//! [`FileStore::open`] and kept in memory; every write serializes a modified
//! copy, replaces the file atomically (temp file, fsync, rename) and only then
//! swaps the copy in. A failed write therefore leaves both the file and the
//! in-memory map at their previous state.

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{KeyValueStore, StoreError};

/// File name used inside the data directory.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// A [`KeyValueStore`] persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is also treated as empty (logged at warn); it is overwritten by
    /// the next write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => parse_entries(&path, &contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "storage opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens `storage.json` inside `dir`.
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub fn open_in(dir: &Path) -> Result<Self, StoreError> {
        Self::open(dir.join(STORAGE_FILE_NAME))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the map, persists it, then commits it.
    fn write_with(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        change(&mut next);
        let bytes = serde_json::to_vec_pretty(&next)?;
        write_atomic_file(&self.path, &bytes)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write_with(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if !self.entries.lock().contains_key(key) {
            return Ok(());
        }
        self.write_with(|map| {
            map.remove(key);
        })
    }
}

fn parse_entries(path: &Path, contents: &str) -> BTreeMap<String, String> {
    if contents.trim().is_empty() {
        return BTreeMap::new();
    }
    serde_json::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "storage file is not a JSON string map, starting empty"
        );
        BTreeMap::new()
    })
}

fn write_atomic_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(io_err)?;
    let tmp = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(STORAGE_FILE_NAME),
        std::process::id()
    ));
    let written = write_synced(&tmp, bytes).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    if let Ok(dir) = std::fs::File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = std::fs::File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}
