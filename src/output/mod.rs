//! Output formatting for tend.
//!
//! This module provides formatters for displaying tasks and date results in
//! various formats.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::error::TendError;
use crate::features::nlp::{DateSuggestion, ParsedDate, ProcessedTask};
use crate::features::recurrence::Completion;
use crate::tasks::TaskRecord;

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[TaskRecord],
    title: &str,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, TendError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title, today)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_task(
    task: &TaskRecord,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, TendError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task, today)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format a parse result based on output format
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_parsed(
    input: &str,
    parsed: Option<&ParsedDate>,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, TendError> {
    match format {
        OutputFormat::Pretty => Ok(format_parsed_pretty(input, parsed, today)),
        OutputFormat::Json => format_parsed_json(input, parsed),
    }
}

/// Format date suggestions based on output format
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_suggestions(
    partial: &str,
    suggestions: &[DateSuggestion],
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, TendError> {
    match format {
        OutputFormat::Pretty => Ok(format_suggestions_pretty(partial, suggestions, today)),
        OutputFormat::Json => format_suggestions_json(partial, suggestions),
    }
}

/// Format a processed task title based on output format
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_processed(
    task: &ProcessedTask,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, TendError> {
    match format {
        OutputFormat::Pretty => Ok(format_processed_pretty(task, today)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format a completion based on output format
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_completion(
    completion: &Completion,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, TendError> {
    match format {
        OutputFormat::Pretty => Ok(format_completion_pretty(completion, today)),
        OutputFormat::Json => to_json(completion),
    }
}
