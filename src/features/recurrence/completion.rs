//! Completing tasks and spawning their next occurrence.

use serde::Serialize;
use tracing::{info, warn};

use crate::core::Clock;
use crate::error::TendError;
use crate::tasks::{TaskRecord, TaskStore};

use super::projector::next_occurrence;

/// Outcome of completing a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// The task as stored after completion.
    pub task: TaskRecord,
    /// The newly created occurrence, for recurring tasks.
    pub next: Option<TaskRecord>,
}

/// Mark a task completed and, if it recurs, add its next occurrence.
///
/// The completion is saved before the next occurrence is added. A failed
/// add is returned as-is; it is not retried.
///
/// # Errors
///
/// Returns `TendError::InvalidArgument` if the task is already completed, or
/// any error the store reports.
pub fn complete_task<S, C>(store: &mut S, id: &str, clock: &C) -> Result<Completion, TendError>
where
    S: TaskStore + ?Sized,
    C: Clock,
{
    let mut task = store.get_task(id)?;
    if task.completed {
        return Err(TendError::InvalidArgument(format!(
            "Task {id} is already completed"
        )));
    }

    let completed_at = clock.now();
    task.completed = true;
    task.completed_at = Some(completed_at);
    store.update_task(&task)?;
    info!(task_id = %task.id, "task completed");

    let next = match next_occurrence(&task, completed_at, clock) {
        Some(seed) => {
            let created = store.add_task(&seed).map_err(|e| {
                warn!(task_id = %task.id, error = %e, "failed to add next occurrence");
                e
            })?;
            info!(task_id = %task.id, next_id = %created.id, "next occurrence added");
            Some(created)
        },
        None => None,
    };

    Ok(Completion { task, next })
}

/// Mark a completed task as open again.
///
/// Occurrences already spawned from it are left alone.
///
/// # Errors
///
/// Returns `TendError::InvalidArgument` if the task is not completed, or any
/// error the store reports.
pub fn reopen_task<S>(store: &mut S, id: &str) -> Result<TaskRecord, TendError>
where
    S: TaskStore + ?Sized,
{
    let mut task = store.get_task(id)?;
    if !task.completed {
        return Err(TendError::InvalidArgument(format!("Task {id} is not completed")));
    }

    task.completed = false;
    task.completed_at = None;
    store.update_task(&task)?;
    info!(task_id = %task.id, "task reopened");

    Ok(task)
}
