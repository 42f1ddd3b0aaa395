//! Domain model for Tasktrack.
//!
//! Task records, draft validation, the ordered per-user task collection and
//! the filter/search pipeline. Nothing in this crate performs I/O; the
//! application crate persists what these types produce.

pub mod clock;
pub mod filter;
pub mod list;
pub mod task;

pub use clock::{Clock, SystemClock};
pub use filter::{PriorityFilter, StatusFilter, TaskQuery, TaskStats, view};
pub use list::{TaskError, TaskList};
pub use task::{
    DUE_DATE_FORMAT, Priority, Task, TaskDraft, TaskId, ValidTask, ValidationError, parse_tags,
};
