//! Date phrase commands: `parse`, `suggest` and `extract`.
//!
//! These only read the clock; they never touch the task store.

use crate::core::Clock;
use crate::error::TendError;
use crate::output::{format_parsed, format_processed, format_suggestions};

use super::Context;

/// Execute parse command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn parse<C: Clock>(ctx: &Context<C>, text: &str) -> Result<String, TendError> {
    let parsed = ctx.assistant().parse_date_string(text);
    format_parsed(text, parsed.as_ref(), ctx.today(), ctx.format)
}

/// Execute suggest command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn suggest<C: Clock>(ctx: &Context<C>, partial: &str) -> Result<String, TendError> {
    let suggestions = ctx.assistant().get_date_suggestions(partial);
    format_suggestions(partial, &suggestions, ctx.today(), ctx.format)
}

/// Execute extract command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn extract<C: Clock>(ctx: &Context<C>, text: &str) -> Result<String, TendError> {
    let processed = ctx.assistant().process_task_with_date(text);
    format_processed(&processed, ctx.today(), ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::cli::commands::test_support::context;
    use serde_json::Value;

    #[test]
    fn test_parse_json() {
        let ctx = context(OutputFormat::Json);
        let value: Value = serde_json::from_str(&parse(&ctx, "next friday").unwrap()).unwrap();

        assert_eq!(value["result"]["date"], "2024-01-05");
        assert_eq!(value["result"]["confidence"], "high");
        assert_eq!(value["result"]["isRelative"], true);
    }

    #[test]
    fn test_parse_unknown_phrase() {
        let ctx = context(OutputFormat::Pretty);
        assert!(parse(&ctx, "someday maybe").unwrap().contains("No date recognised"));
    }

    #[test]
    fn test_suggest_json_in_table_order() {
        let ctx = context(OutputFormat::Json);
        let value: Value = serde_json::from_str(&suggest(&ctx, "to").unwrap()).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["items"][0]["text"], "today");
        assert_eq!(value["items"][1]["text"], "tomorrow");
        assert_eq!(value["items"][1]["date"], "2024-01-04");
    }

    #[test]
    fn test_extract_json() {
        let ctx = context(OutputFormat::Json);
        let value: Value =
            serde_json::from_str(&extract(&ctx, "Buy groceries tomorrow").unwrap()).unwrap();

        assert_eq!(value["title"], "Buy groceries");
        assert_eq!(value["hasDate"], true);
        assert_eq!(value["dueDate"], "2024-01-04");
        assert_eq!(value["extracted"]["start"], 14);
        assert_eq!(value["extracted"]["end"], 22);
    }

    #[test]
    fn test_parse_respects_strict_policy() {
        let mut ctx = context(OutputFormat::Json);
        ctx.config.dates = crate::features::nlp::CalendarPolicy::strict();
        let value: Value =
            serde_json::from_str(&parse(&ctx, "next wednesday").unwrap()).unwrap();

        assert_eq!(value["result"]["date"], "2024-01-10");
    }
}
