//! The ordered task collection of one user.
//!
//! [`TaskList`] owns the records and implements every mutation as a plain
//! method taking the current instant. It knows nothing about storage; the
//! application's task manager persists the list after each successful call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::next_timestamp;
use crate::filter::{self, TaskQuery, TaskStats};
use crate::task::{Task, TaskDraft, TaskId, ValidationError};

/// Errors from collection operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// The draft did not validate; the collection is unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No task with this id exists; the collection is unchanged.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// An ordered sequence of tasks with unique ids.
///
/// Insertion order is display order: new tasks go to the end and edits keep
/// their position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Wraps already-persisted tasks, keeping their order.
    #[must_use]
    pub const fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// All tasks in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks matching `query`, in list order.
    #[must_use]
    pub fn view(&self, query: &TaskQuery) -> Vec<&Task> {
        filter::view(&self.tasks, query)
    }

    /// Counters over the whole list.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::of(&self.tasks)
    }

    /// Validates `draft` and appends it as a new incomplete task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] if the draft is invalid.
    pub fn add(&mut self, draft: &TaskDraft, now: DateTime<Utc>) -> Result<Task, TaskError> {
        let valid = draft.validate()?;
        let task = Task::from_valid(self.fresh_id(now), valid, now);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Replaces the editable fields of an existing task in place.
    ///
    /// `id`, `created_at` and `completed` are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] for an unknown id and
    /// [`TaskError::Validation`] if the draft is invalid.
    pub fn update(
        &mut self,
        id: TaskId,
        draft: &TaskDraft,
        now: DateTime<Utc>,
    ) -> Result<Task, TaskError> {
        let task = self.get_mut(id)?;
        let valid = draft.validate()?;
        task.apply(valid);
        task.updated_at = next_timestamp(now, task.updated_at);
        Ok(task.clone())
    }

    /// Removes a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] for an unknown id.
    pub fn remove(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(idx))
    }

    /// Flips the completion flag of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] for an unknown id.
    pub fn toggle_complete(&mut self, id: TaskId, now: DateTime<Utc>) -> Result<Task, TaskError> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        task.updated_at = next_timestamp(now, task.updated_at);
        Ok(task.clone())
    }

    /// Consumes the list, returning the tasks in order.
    #[must_use]
    pub fn into_inner(self) -> Vec<Task> {
        self.tasks
    }

    /// The id for a task created at `now`, moved past the largest existing id
    /// if it collides.
    fn fresh_id(&self, now: DateTime<Utc>) -> TaskId {
        let candidate = TaskId::from_instant(now);
        if self.get(candidate).is_none() {
            return candidate;
        }
        let max = self
            .tasks
            .iter()
            .map(|t| t.id.get())
            .max()
            .unwrap_or_else(|| candidate.get());
        TaskId::new(max.saturating_add(1))
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task, TaskError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
