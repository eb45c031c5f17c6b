//! Task commands: `list`, `show`, `done`, `reopen` and `delete`.

use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::core::Clock;
use crate::error::TendError;
use crate::features::recurrence::{complete_task, reopen_task};
use crate::output::{format_completion, format_task, format_tasks, to_json};
use crate::tasks::TaskStore;

use super::Context;

/// Execute list command
///
/// # Errors
///
/// Returns an error if the store fails or output formatting fails.
pub fn list<S, C>(store: &S, ctx: &Context<C>, all: bool) -> Result<String, TendError>
where
    S: TaskStore + ?Sized,
    C: Clock,
{
    let tasks = store.list_tasks(&ctx.config.general.user_id, all)?;
    let title = if all { "All tasks" } else { "Open tasks" };
    format_tasks(&tasks, title, ctx.today(), ctx.format)
}

/// Execute show command
///
/// # Errors
///
/// Returns an error if the task does not exist or output formatting fails.
pub fn show<S, C>(store: &S, ctx: &Context<C>, id: &str) -> Result<String, TendError>
where
    S: TaskStore + ?Sized,
    C: Clock,
{
    let task = store.get_task(id)?;
    format_task(&task, ctx.today(), ctx.format)
}

/// Execute done command
///
/// # Errors
///
/// Returns an error if the task does not exist, is already completed, or the
/// store fails.
pub fn done<S, C>(store: &mut S, ctx: &Context<C>, id: &str) -> Result<String, TendError>
where
    S: TaskStore + ?Sized,
    C: Clock,
{
    let completion = complete_task(store, id, &ctx.clock)?;
    format_completion(&completion, ctx.today(), ctx.format)
}

/// Execute reopen command
///
/// # Errors
///
/// Returns an error if the task does not exist, is not completed, or the store
/// fails.
pub fn reopen<S, C>(store: &mut S, ctx: &Context<C>, id: &str) -> Result<String, TendError>
where
    S: TaskStore + ?Sized,
    C: Clock,
{
    let task = reopen_task(store, id)?;
    match ctx.format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!("Reopened: {} (ID: {})", task.title, task.id)),
    }
}

/// Execute delete command
///
/// # Errors
///
/// Returns an error if the task does not exist or the store fails.
pub fn delete<S, C>(store: &mut S, ctx: &Context<C>, id: &str) -> Result<String, TendError>
where
    S: TaskStore + ?Sized,
    C: Clock,
{
    let task = store.get_task(id)?;
    store.delete_task(&task.id)?;

    match ctx.format {
        OutputFormat::Json => to_json(&json!({ "deleted": true, "id": task.id })),
        OutputFormat::Pretty => Ok(format!("Deleted: {} (ID: {})", task.title, task.id)),
    }
}
