//! Recurring tasks.
//!
//! When a recurring task is completed, a new task is created for its next
//! occurrence:
//! - daily, weekly, biweekly: counted from the completion date
//! - monthly, quarterly, yearly: counted from the original due date for
//!   bills and birthdays, otherwise from the completion date

mod classify;
mod completion;
mod projector;

pub use classify::{classify, is_occasion, TaskClass};
pub use completion::{complete_task, reopen_task, Completion};
pub use projector::{anchor_date, next_due_date, next_occurrence, Recurrence};
