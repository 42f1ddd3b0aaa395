//! `Tasktrack`: terminal task tracker with per-user local storage.

pub mod app;
pub mod config;
pub mod session;
pub mod storage;
pub mod tasks;
pub mod ui;
