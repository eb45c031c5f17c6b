//! The persistence seam.
//!
//! The date and recurrence logic never touches storage directly; callers
//! hand it records fetched through a [`TaskStore`] and pass its output back.

use crate::error::TendError;

use super::types::{TaskRecord, TaskSeed};

/// Create, read, update, and delete tasks.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStore {
    /// Persist a new task and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be written.
    fn add_task(&mut self, seed: &TaskSeed) -> Result<TaskRecord, TendError>;

    /// Fetch a single task.
    ///
    /// # Errors
    ///
    /// Returns `TendError::NotFound` if no task has this id.
    fn get_task(&self, id: &str) -> Result<TaskRecord, TendError>;

    /// List a user's tasks, ordered by due date (undated last).
    ///
    /// # Errors
    ///
    /// Returns an error if the tasks cannot be read.
    fn list_tasks(&self, user_id: &str, include_completed: bool)
        -> Result<Vec<TaskRecord>, TendError>;

    /// Overwrite a stored task.
    ///
    /// # Errors
    ///
    /// Returns `TendError::NotFound` if no task has this id.
    fn update_task(&mut self, task: &TaskRecord) -> Result<(), TendError>;

    /// Remove a task.
    ///
    /// # Errors
    ///
    /// Returns `TendError::NotFound` if no task has this id.
    fn delete_task(&mut self, id: &str) -> Result<(), TendError>;
}
