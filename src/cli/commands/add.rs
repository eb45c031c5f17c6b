//! Add command implementation.
//!
//! This module implements the `tend add` command: a date phrase in the task
//! text becomes the due date, and recurring phrases set the recurrence.

use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::cli::args::{AddArgs, OutputFormat};
use crate::core::{parse_date_only, Clock};
use crate::error::TendError;
use crate::features::nlp::ParsedDate;
use crate::features::recurrence::Recurrence;
use crate::tasks::{push_tag, TaskSeed, TaskStore, RECURRING_TAG};

use super::Context;

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if the title is empty, the `--every` or `--due` value is
/// not understood, or the store fails.
pub fn add<S, C>(store: &mut S, ctx: &Context<C>, args: AddArgs) -> Result<String, TendError>
where
    S: TaskStore + ?Sized,
    C: Clock,
{
    let assistant = ctx.assistant();
    let processed = assistant.process_task_with_date(&args.text);
    let title = processed.title.trim();

    if title.is_empty() {
        return Err(TendError::InvalidArgument(
            "Task title is empty once the date phrase is removed".to_string(),
        ));
    }

    // An explicit --due wins over the phrase in the text for the date only.
    let text_rule = processed.parsed().and_then(|p| p.rule);
    let mut due_rule = None;
    let due_date = match args.due.as_deref() {
        Some(due) => {
            if let Some(date) = parse_date_only(due) {
                Some(date)
            } else {
                let parsed = assistant
                    .parse_date_string(due)
                    .filter(ParsedDate::is_high)
                    .ok_or_else(|| {
                        TendError::InvalidArgument(format!("Unrecognised due date '{due}'"))
                    })?;
                due_rule = parsed.rule;
                parsed.date
            }
        },
        None => processed.due_date,
    };

    let recurrence = match args.every.as_deref() {
        Some(every) => Some(every.parse::<Recurrence>()?),
        None => text_rule
            .and_then(Recurrence::from_rule)
            .or_else(|| due_rule.and_then(Recurrence::from_rule)),
    };

    let mut tags: Vec<String> = Vec::new();
    for tag in &args.tags {
        let trimmed = tag.trim();
        if !trimmed.is_empty() {
            push_tag(&mut tags, trimmed);
        }
    }
    if recurrence.is_some() {
        push_tag(&mut tags, RECURRING_TAG);
    }

    let seed = TaskSeed {
        user_id: ctx.config.general.user_id.clone(),
        user_name: ctx.config.general.user_name.clone(),
        title: title.to_string(),
        description: args.notes.unwrap_or_default(),
        entry_date: ctx.clock.now(),
        tags,
        due_date,
        completed: false,
        recurrence: recurrence.map(|r| r.as_str().to_string()),
        parent_task_id: None,
    };
    debug!(title = %seed.title, due = ?seed.due_date, recurrence = ?seed.recurrence, "adding task");

    let task = store.add_task(&seed)?;

    match ctx.format {
        OutputFormat::Json => {
            let output = json!({
                "created": true,
                "task": task,
                "phrase": processed.extracted.as_ref().map(|e| e.text.as_str()),
            });
            Ok(serde_json::to_string_pretty(&output)?)
        },
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} {} (ID: {})",
                "Created:".green().bold(),
                task.title,
                task.id.dimmed()
            );
            if let Some(due) = task.due_date {
                output.push_str(&format!(
                    "\n  Due: {}",
                    assistant.format_date_for_display(due).yellow()
                ));
            }
            if let Some(recurrence) = &task.recurrence {
                output.push_str(&format!("\n  Repeats: {}", recurrence.magenta()));
            }
            Ok(output)
        },
    }
}
