//! Task manager for one user's task list.
//!
//! `TaskManager` is the only writer of a user's task key. Every mutation runs
//! against a copy of the in-memory list; when the operation succeeds the copy
//! is written to the store as a whole and then becomes the current list.

use tasktrack_core::{Clock, Task, TaskDraft, TaskId, TaskList, TaskQuery, TaskStats};

use super::TaskError;
use crate::storage::{KeyValueStore, StoreAdapter};

/// Shown when a mutation could not be written to disk.
pub const PERSIST_WARNING: &str = "Saved in memory but could not write to disk";

/// Holds and persists the task list of the logged-in user.
pub struct TaskManager<S> {
    adapter: StoreAdapter<S>,
    username: String,
    tasks: TaskList,
    clock: Box<dyn Clock>,
    warning: Option<String>,
}

impl<S: KeyValueStore> TaskManager<S> {
    /// Loads `username`'s tasks from the store.
    #[must_use]
    pub fn open(adapter: StoreAdapter<S>, username: &str, clock: impl Clock + 'static) -> Self {
        let tasks = adapter.load_tasks(username);
        tracing::info!(user = %username, count = tasks.len(), "task list opened");
        Self {
            adapter,
            username: username.to_string(),
            tasks,
            clock: Box::new(clock),
            warning: None,
        }
    }

    /// The user whose tasks these are.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// All tasks in order.
    #[must_use]
    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Tasks passing `query`, in list order.
    #[must_use]
    pub fn view(&self, query: &TaskQuery) -> Vec<&Task> {
        self.tasks.view(query)
    }

    /// Counters over the whole list.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        self.tasks.stats()
    }

    /// Creates a task from `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] if the draft is invalid.
    pub fn add(&mut self, draft: &TaskDraft) -> Result<Task, TaskError> {
        let now = self.clock.now();
        let task = self.mutate(|list| list.add(draft, now))?;
        tracing::info!(user = %self.username, task_id = %task.id, "task added");
        Ok(task)
    }

    /// Replaces the editable fields of task `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] or [`TaskError::Validation`].
    pub fn update(&mut self, id: TaskId, draft: &TaskDraft) -> Result<Task, TaskError> {
        let now = self.clock.now();
        let task = self.mutate(|list| list.update(id, draft, now))?;
        tracing::info!(user = %self.username, task_id = %id, "task updated");
        Ok(task)
    }

    /// Deletes task `id`. Confirmation is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if there is no such task.
    pub fn remove(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let task = self.mutate(|list| list.remove(id))?;
        tracing::info!(user = %self.username, task_id = %id, "task removed");
        Ok(task)
    }

    /// Flips the completion flag of task `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if there is no such task.
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let now = self.clock.now();
        let task = self.mutate(|list| list.toggle_complete(id, now))?;
        tracing::info!(
            user = %self.username,
            task_id = %id,
            completed = task.completed,
            "task completion toggled"
        );
        Ok(task)
    }

    /// Returns and clears the last persistence warning.
    pub fn take_warning(&mut self) -> Option<String> {
        self.warning.take()
    }

    /// Runs `op` on a copy of the list and, on success, persists and keeps it.
    ///
    /// A failed write keeps the new list in memory and records a warning.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut TaskList) -> Result<T, TaskError>,
    ) -> Result<T, TaskError> {
        let mut next = self.tasks.clone();
        let out = op(&mut next)?;
        if let Err(e) = self.adapter.save_tasks(&self.username, &next) {
            tracing::warn!(
                user = %self.username,
                error = %e,
                "task list write failed, keeping changes in memory"
            );
            self.warning = Some(PERSIST_WARNING.to_string());
        }
        self.tasks = next;
        Ok(out)
    }
}
