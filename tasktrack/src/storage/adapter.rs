//! Maps task lists and the session identity onto store keys.

use std::sync::Arc;

use tasktrack_core::TaskList;

use super::{KeyValueStore, StoreError};

/// Key holding the logged-in username.
pub const SESSION_KEY: &str = "taskTrackerUser";

/// Prefix of the per-user task list keys.
pub const TASKS_KEY_PREFIX: &str = "tasks_";

/// Key under which `username`'s task list is stored.
#[must_use]
pub fn tasks_key(username: &str) -> String {
    format!("{TASKS_KEY_PREFIX}{username}")
}

/// The boundary between in-memory state and the key-value store.
///
/// Cheap to clone; clones share the same backend.
pub struct StoreAdapter<S> {
    store: Arc<S>,
}

impl<S> Clone for StoreAdapter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> StoreAdapter<S> {
    /// Wraps a backend.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wraps an already shared backend.
    #[must_use]
    pub const fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying backend.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes `username`'s whole task list, replacing the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the write fails.
    pub fn save_tasks(&self, username: &str, tasks: &TaskList) -> Result<(), StoreError> {
        let json = serde_json::to_string(tasks)?;
        self.store.set(&tasks_key(username), &json)?;
        tracing::debug!(user = %username, count = tasks.len(), "task list saved");
        Ok(())
    }

    /// Reads `username`'s task list.
    ///
    /// An absent key yields an empty list. Unreadable or malformed data also
    /// yields an empty list, logged at warn, since there is nothing to recover.
    #[must_use]
    pub fn load_tasks(&self, username: &str) -> TaskList {
        let key = tasks_key(username);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return TaskList::new(),
            Err(e) => {
                tracing::warn!(user = %username, error = %e, "could not read task list");
                return TaskList::new();
            }
        };
        match serde_json::from_str::<TaskList>(&raw) {
            Ok(tasks) => {
                tracing::debug!(user = %username, count = tasks.len(), "task list loaded");
                tasks
            }
            Err(e) => {
                tracing::warn!(
                    user = %username,
                    error = %e,
                    "stored task list is corrupt, using an empty list"
                );
                TaskList::new()
            }
        }
    }

    /// Deletes `username`'s task list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub fn clear_tasks(&self, username: &str) -> Result<(), StoreError> {
        self.store.remove(&tasks_key(username))?;
        tracing::info!(user = %username, "task list cleared");
        Ok(())
    }

    /// Reads the persisted session username, ignoring blank values.
    #[must_use]
    pub fn load_session(&self) -> Option<String> {
        match self.store.get(SESSION_KEY) {
            Ok(name) => name.filter(|n| !n.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read session");
                None
            }
        }
    }

    /// Persists the session username.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub fn save_session(&self, username: &str) -> Result<(), StoreError> {
        self.store.set(SESSION_KEY, username)
    }

    /// Removes the persisted session username.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_KEY)
    }
}
