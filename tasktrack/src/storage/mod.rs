//! Local key-value persistence.
//!
//! Defines the [`KeyValueStore`] trait (a string-to-string map with atomic
//! per-key replace), its backends, and the [`StoreAdapter`] that maps task
//! lists and the session identity onto keys.
//!
//! Backends:
//! - [`FileStore`]: one JSON object file, rewritten atomically on every write
//! - [`MemoryStore`]: process-local map for tests and throwaway runs

pub mod adapter;
pub mod file;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

pub use adapter::{SESSION_KEY, StoreAdapter, TASKS_KEY_PREFIX, tasks_key};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur in a key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A value could not be serialized.
    #[error("failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A local string-to-string store.
///
/// Every `set` or `remove` is a single atomic replace from the caller's point
/// of view: after it returns `Ok`, a fresh reader sees the new value.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write could not be completed; the
    /// previous value is then still in place.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write could not be completed.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
