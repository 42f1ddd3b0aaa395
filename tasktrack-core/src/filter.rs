//! Filter/search pipeline for the dashboard.
//!
//! [`view`] ANDs three independent predicates (status, priority, text) over a
//! task slice and keeps the surviving tasks in source order. Nothing is
//! cached: the view is rebuilt on every call.

use std::fmt;

use crate::task::{Priority, Task};

/// Restriction on completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No restriction.
    #[default]
    All,
    /// Only tasks not yet completed.
    Pending,
    /// Only completed tasks.
    Completed,
}

impl StatusFilter {
    /// Whether `task` passes this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Next filter in the All → Pending → Completed cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Pending,
            Self::Pending => Self::Completed,
            Self::Completed => Self::All,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Restriction on priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    /// No restriction.
    #[default]
    All,
    /// Exactly this priority.
    Only(Priority),
}

impl PriorityFilter {
    /// Whether `task` passes this filter.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => task.priority == p,
        }
    }

    /// Next filter in the All → Low → Medium → High cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Only(Priority::Low),
            Self::Only(Priority::Low) => Self::Only(Priority::Medium),
            Self::Only(Priority::Medium) => Self::Only(Priority::High),
            Self::Only(Priority::High) => Self::All,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(p) => write!(f, "{p}"),
        }
    }
}

/// The three dashboard predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Completion filter.
    pub status: StatusFilter,
    /// Priority filter.
    pub priority: PriorityFilter,
    /// Case-insensitive substring searched in title and description.
    pub search: String,
}

impl TaskQuery {
    /// Whether `task` passes all three predicates.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_lowered(task, &self.search.to_lowercase())
    }

    /// `matches` with the search text already lowercased.
    fn matches_lowered(&self, task: &Task, needle: &str) -> bool {
        self.status.matches(task) && self.priority.matches(task) && text_matches(task, needle)
    }
}

/// Tasks passing `query`, in source order.
#[must_use]
pub fn view<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<&'a Task> {
    let needle = query.search.to_lowercase();
    tasks
        .iter()
        .filter(|t| query.matches_lowered(t, &needle))
        .collect()
}

/// `needle` must already be lowercased. An empty needle matches everything.
fn text_matches(task: &Task, needle: &str) -> bool {
    needle.is_empty()
        || task.title.to_lowercase().contains(needle)
        || task.description.to_lowercase().contains(needle)
}

/// Dashboard counters over an unfiltered task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// All tasks.
    pub total: usize,
    /// Tasks not completed.
    pub pending: usize,
    /// Completed tasks.
    pub completed: usize,
}

impl TaskStats {
    /// Counts `tasks`.
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }
}
