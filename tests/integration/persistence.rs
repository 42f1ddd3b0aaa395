//! Integration tests for on-disk persistence.
//!
//! Everything goes through a real `FileStore` in a temporary directory and
//! is read back from a freshly opened store, as a restart would.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use chrono::{TimeZone, Utc};
use tasktrack::storage::{FileStore, KeyValueStore, SESSION_KEY, StoreAdapter, tasks_key};
use tasktrack::tasks::TaskManager;
use tasktrack_core::{Priority, SystemClock, TaskDraft, TaskList};

fn reopen(dir: &Path) -> StoreAdapter<FileStore> {
    StoreAdapter::new(FileStore::open_in(dir).unwrap())
}

fn sample_list() -> TaskList {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    let mut list = TaskList::new();
    list.add(
        &TaskDraft {
            description: "two litres".to_string(),
            priority: Priority::Low,
            due_date: "2024-05-03".to_string(),
            tags: "home, errands".to_string(),
            ..TaskDraft::titled("Buy milk")
        },
        now,
    )
    .unwrap();
    let report = list
        .add(&TaskDraft::titled("Write report"), now + chrono::TimeDelta::seconds(1))
        .unwrap();
    list.toggle_complete(report.id, now + chrono::TimeDelta::seconds(2))
        .unwrap();
    list
}

#[test]
fn saved_list_survives_reopen_field_for_field() {
    let dir = tempfile::tempdir().unwrap();
    let list = sample_list();
    reopen(dir.path()).save_tasks("alice", &list).unwrap();

    assert_eq!(reopen(dir.path()).load_tasks("alice"), list);
}

#[test]
fn users_are_isolated_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = reopen(dir.path());
    let alice = sample_list();
    let mut bob = TaskList::new();
    bob.add(&TaskDraft::titled("bob's"), Utc::now()).unwrap();

    adapter.save_tasks("alice", &alice).unwrap();
    adapter.save_tasks("bob", &bob).unwrap();

    let fresh = reopen(dir.path());
    assert_eq!(fresh.load_tasks("alice"), alice);
    assert_eq!(fresh.load_tasks("bob"), bob);
    assert!(fresh.load_tasks("carol").is_empty());
}

#[test]
fn stored_layout_uses_documented_keys() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = reopen(dir.path());
    adapter.save_session("alice").unwrap();
    adapter.save_tasks("alice", &sample_list()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(map[SESSION_KEY], "alice");

    let tasks_json = map[&tasks_key("alice")].as_str().unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(tasks_json).unwrap();
    assert_eq!(records.len(), 2);
    let first = &records[0];
    for field in [
        "id",
        "title",
        "description",
        "priority",
        "dueDate",
        "tags",
        "completed",
        "createdAt",
        "updatedAt",
    ] {
        assert!(first.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(first["priority"], "Low");
    assert_eq!(first["dueDate"], "2024-05-03");
}

#[test]
fn corrupt_task_blob_loads_empty_and_is_replaced_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = reopen(dir.path());
    adapter
        .store()
        .set(&tasks_key("alice"), "{not json")
        .unwrap();

    let mut mgr = TaskManager::open(adapter, "alice", SystemClock);
    assert!(mgr.tasks().is_empty());
    mgr.add(&TaskDraft::titled("fresh start")).unwrap();

    assert_eq!(reopen(dir.path()).load_tasks("alice").len(), 1);
}

#[test]
fn corrupt_storage_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("storage.json"), "[1, 2, 3]").unwrap();

    let adapter = reopen(dir.path());
    assert_eq!(adapter.load_session(), None);
    adapter.save_session("alice").unwrap();
    assert_eq!(reopen(dir.path()).load_session().as_deref(), Some("alice"));
}

#[test]
fn clear_removes_only_that_user() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = reopen(dir.path());
    adapter.save_tasks("alice", &sample_list()).unwrap();
    adapter.save_tasks("bob", &sample_list()).unwrap();
    adapter.clear_tasks("alice").unwrap();

    let fresh = reopen(dir.path());
    assert!(fresh.load_tasks("alice").is_empty());
    assert_eq!(fresh.load_tasks("bob").len(), 2);
}

#[test]
fn writes_leave_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = reopen(dir.path());
    for i in 0..5 {
        adapter.save_session(&format!("user{i}")).unwrap();
    }
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, ["storage.json"]);
}
