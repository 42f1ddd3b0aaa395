//! Property-based tests for the filter/search pipeline and task collection.
//!
//! Uses proptest to verify:
//! 1. `view` returns exactly the tasks matching the query, in source order,
//!    and agrees with `TaskQuery::matches`.
//! 2. `view` with the default query is the identity.
//! 3. Adding a valid draft grows the list by one with `createdAt == updatedAt`.
//! 4. Ids stay unique whatever instants the clock hands out.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use tasktrack_core::{
    Priority, PriorityFilter, StatusFilter, Task, TaskDraft, TaskId, TaskList, TaskQuery, view,
};

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

fn arb_status_filter() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::All),
        Just(StatusFilter::Pending),
        Just(StatusFilter::Completed)
    ]
}

fn arb_priority_filter() -> impl Strategy<Value = PriorityFilter> {
    prop_oneof![
        Just(PriorityFilter::All),
        arb_priority().prop_map(PriorityFilter::Only)
    ]
}

/// Strategy for tasks with small vocabularies so searches actually hit.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(
        (
            "(Buy|Write|Fix|call) (milk|report|bug|Mom)",
            "(|urgent|Later|milk)",
            arb_priority(),
            any::<bool>(),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (title, description, priority, completed))| {
                let id = i64::try_from(i).unwrap_or(0);
                let at = instant(1_700_000_000_000 + id);
                Task {
                    id: TaskId::new(id),
                    title,
                    description,
                    priority,
                    due_date: None,
                    tags: Vec::new(),
                    completed,
                    created_at: at,
                    updated_at: at,
                }
            })
            .collect()
    })
}

fn arb_query() -> impl Strategy<Value = TaskQuery> {
    (
        arb_status_filter(),
        arb_priority_filter(),
        "(|milk|MILK|rep|bug|urgent|zzz)",
    )
        .prop_map(|(status, priority, search)| TaskQuery {
            status,
            priority,
            search,
        })
}

/// The dashboard predicate written out longhand.
fn expected_match(task: &Task, query: &TaskQuery) -> bool {
    let status_ok = match query.status {
        StatusFilter::All => true,
        StatusFilter::Pending => !task.completed,
        StatusFilter::Completed => task.completed,
    };
    let priority_ok = match query.priority {
        PriorityFilter::All => true,
        PriorityFilter::Only(p) => task.priority == p,
    };
    let needle = query.search.to_lowercase();
    let text_ok = task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle);
    status_ok && priority_ok && text_ok
}

proptest! {
    #[test]
    fn view_equals_stable_predicate_filter(tasks in arb_tasks(), query in arb_query()) {
        let got: Vec<TaskId> = view(&tasks, &query).iter().map(|t| t.id).collect();
        let expected: Vec<TaskId> = tasks.iter().filter(|t| expected_match(t, &query)).map(|t| t.id).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn query_matches_agrees_with_view(tasks in arb_tasks(), query in arb_query()) {
        let kept = view(&tasks, &query);
        for task in &tasks {
            let in_view = kept.iter().any(|t| t.id == task.id);
            prop_assert_eq!(query.matches(task), in_view);
        }
    }

    #[test]
    fn default_query_keeps_everything(tasks in arb_tasks()) {
        let got = view(&tasks, &TaskQuery::default());
        prop_assert_eq!(got.len(), tasks.len());
    }

    #[test]
    fn add_valid_draft_grows_by_one(
        title in "[a-zA-Z][a-zA-Z ]{0,30}",
        now in 0i64..4_000_000_000_000,
    ) {
        let mut list = TaskList::new();
        list.add(&TaskDraft::titled("existing"), instant(now)).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let before = list.len();
        let task = list.add(&TaskDraft::titled(title), instant(now)).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(list.len(), before + 1);
        prop_assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn ids_stay_unique(instants in prop::collection::vec(0i64..50, 1..40)) {
        let mut list = TaskList::new();
        for ms in instants {
            list.add(&TaskDraft::titled("t"), instant(ms)).map_err(|e| TestCaseError::fail(e.to_string()))?;
        }
        let mut ids: Vec<TaskId> = list.as_slice().iter().map(|t| t.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }
}
