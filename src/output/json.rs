//! JSON output formatting for tend.
//!
//! This module provides functions for formatting tasks and date results as JSON.

use serde::Serialize;
use serde_json::json;

use crate::error::TendError;
use crate::features::nlp::{DateSuggestion, ParsedDate};
use crate::tasks::TaskRecord;

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[TaskRecord], list_name: &str) -> Result<String, TendError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a parse result as JSON; an unrecognised phrase gives `"result": null`.
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_parsed_json(input: &str, parsed: Option<&ParsedDate>) -> Result<String, TendError> {
    let output = json!({
        "input": input,
        "result": parsed
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format date suggestions as JSON
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn format_suggestions_json(
    partial: &str,
    suggestions: &[DateSuggestion],
) -> Result<String, TendError> {
    let output = json!({
        "input": partial,
        "count": suggestions.len(),
        "items": suggestions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `TendError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, TendError> {
    Ok(serde_json::to_string_pretty(value)?)
}
