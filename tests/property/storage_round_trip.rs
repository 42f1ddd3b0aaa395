//! Property-based tests for task list persistence.
//!
//! Uses proptest to verify:
//! 1. Saving then loading a user's list reproduces it field for field.
//! 2. Saving another user's list never changes what the first user loads.
//! 3. Both hold through a `FileStore` reopened from disk.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use tasktrack::storage::{FileStore, MemoryStore, StoreAdapter};
use tasktrack_core::{Priority, Task, TaskId, TaskList};

fn instant(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(Utc::now)
}

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High)
    ]
}

fn arb_due_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of((2000i32..2100, 1u32..=12, 1u32..=28))
        .prop_map(|d| d.and_then(|(y, m, day)| NaiveDate::from_ymd_opt(y, m, day)))
}

/// Well-formed lists: non-empty trimmed titles, unique ids, no blank tags.
fn arb_task_list() -> impl Strategy<Value = TaskList> {
    prop::collection::vec(
        (
            "[A-Za-z0-9][A-Za-z0-9 ]{0,20}[A-Za-z0-9]",
            "\\PC{0,30}",
            arb_priority(),
            arb_due_date(),
            prop::collection::vec("[a-z]{1,8}", 0..4),
            any::<bool>(),
            0i64..1_000_000,
        ),
        0..12,
    )
    .prop_map(|rows| {
        let tasks = rows
            .into_iter()
            .enumerate()
            .map(
                |(i, (title, description, priority, due_date, tags, completed, age))| {
                    let created = 1_700_000_000_000 + i64::try_from(i).unwrap_or(0) * 10;
                    Task {
                        id: TaskId::new(created),
                        title,
                        description,
                        priority,
                        due_date,
                        tags,
                        completed,
                        created_at: instant(created),
                        updated_at: instant(created + age),
                    }
                },
            )
            .collect();
        TaskList::from_tasks(tasks)
    })
}

proptest! {
    #[test]
    fn save_then_load_reproduces_list(list in arb_task_list()) {
        let adapter = StoreAdapter::new(MemoryStore::new());
        adapter.save_tasks("alice", &list).unwrap();
        prop_assert_eq!(adapter.load_tasks("alice"), list);
    }

    #[test]
    fn other_users_never_leak(alice in arb_task_list(), bob in arb_task_list()) {
        let adapter = StoreAdapter::new(MemoryStore::new());
        adapter.save_tasks("alice", &alice).unwrap();
        adapter.save_tasks("bob", &bob).unwrap();
        prop_assert_eq!(adapter.load_tasks("alice"), alice);
        prop_assert_eq!(adapter.load_tasks("bob"), bob);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn file_store_round_trip_survives_reopen(list in arb_task_list()) {
        let dir = tempfile::tempdir().unwrap();
        StoreAdapter::new(FileStore::open_in(dir.path()).unwrap())
            .save_tasks("alice", &list)
            .unwrap();
        let reopened = StoreAdapter::new(FileStore::open_in(dir.path()).unwrap());
        prop_assert_eq!(reopened.load_tasks("alice"), list);
    }
}
