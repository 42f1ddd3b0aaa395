//! Task collection management for the logged-in user.
//!
//! The collection itself and its operations live in `tasktrack-core`
//! ([`TaskList`](tasktrack_core::TaskList)); this module binds a list to a
//! username and writes it back to the store after every mutation.

pub mod manager;

pub use manager::TaskManager;
pub use tasktrack_core::TaskError;
