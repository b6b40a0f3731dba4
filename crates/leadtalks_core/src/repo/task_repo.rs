//! Task collection operations.
//!
//! # Invariants
//! - After every create/update the collection is ordered by `updated_at DESC`
//!   (stable, so equal timestamps keep their previous relative order).
//! - Delete does not re-sort.
//! - Update of an unknown id is a no-op returning the same snapshot.

use crate::model::lead::LeadId;
use crate::model::task::{Priority, Task, TaskStatus};
use crate::repo::collection::{Collection, Record};
use chrono::{NaiveDate, NaiveDateTime};

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Validated task input; timestamps and id are stamped on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub lead_id: LeadId,
    pub lead_name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub priority: Priority,
    pub created_by: String,
}

/// Creates one task, stamping `created_at = updated_at = now`.
pub fn create_task(
    tasks: &Collection<Task>,
    input: NewTask,
    id: String,
    now: NaiveDateTime,
) -> (Collection<Task>, Task) {
    let task = Task {
        id,
        lead_name: input.lead_name,
        lead_id: input.lead_id,
        description: input.description,
        due_date: input.due_date,
        status: input.status,
        priority: input.priority,
        created_by: input.created_by,
        created_at: now,
        updated_at: now,
    };
    let mut items = tasks.to_vec();
    items.insert(0, task.clone());
    (sort_by_recent(items), task)
}

/// Replaces one task and stamps `updated_at = now`.
///
/// Returns `None` as second element when no task has that id.
pub fn update_task(
    tasks: &Collection<Task>,
    task: Task,
    now: NaiveDateTime,
) -> (Collection<Task>, Option<Task>) {
    if !tasks.contains_id(&task.id) {
        return (tasks.clone(), None);
    }

    let stamped = Task {
        updated_at: now,
        ..task
    };
    let (replaced, _) = tasks.upsert(stamped.clone());
    (sort_by_recent(replaced.to_vec()), Some(stamped))
}

pub fn delete_task(tasks: &Collection<Task>, id: &str) -> Collection<Task> {
    tasks.remove(id)
}

fn sort_by_recent(mut items: Vec<Task>) -> Collection<Task> {
    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Collection::new(items)
}

#[cfg(test)]
mod tests {
    use super::{create_task, delete_task, update_task, NewTask};
    use crate::model::task::{Priority, TaskStatus};
    use crate::repo::collection::Collection;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 1)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap()
    }

    fn input(description: &str) -> NewTask {
        NewTask {
            lead_id: String::new(),
            lead_name: String::new(),
            description: description.to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 10, 17).unwrap(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            created_by: "Agência Brakeel".to_string(),
        }
    }

    #[test]
    fn create_and_update_keep_recent_first() {
        let (tasks, older) = create_task(&Collection::default(), input("older"), "t1".into(), at(0));
        let (tasks, _) = create_task(&tasks, input("newer"), "t2".into(), at(5));
        assert_eq!(tasks[0].description, "newer");

        let (tasks, updated) = update_task(&tasks, older, at(0) + Duration::minutes(30));
        let updated = updated.expect("known task should update");
        assert_eq!(updated.updated_at, at(30));
        assert_eq!(tasks[0].id, "t1");
        assert_eq!(tasks[0].created_at, at(0));
    }

    #[test]
    fn update_of_unknown_task_is_noop() {
        let (tasks, mut task) = create_task(&Collection::default(), input("x"), "t1".into(), at(0));
        task.id = "missing".to_string();
        let (next, updated) = update_task(&tasks, task, at(9));
        assert!(updated.is_none());
        assert!(next.ptr_eq(&tasks));
    }

    #[test]
    fn delete_does_not_resort() {
        let items = vec![input("a"), input("b"), input("c")];
        let mut tasks = Collection::default();
        for (index, item) in items.into_iter().enumerate() {
            let (next, _) = create_task(&tasks, item, format!("t{index}"), at(index as u32));
            tasks = next;
        }
        let after = delete_task(&tasks, "t1");
        let ids: Vec<&str> = after.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t0"]);
    }
}
