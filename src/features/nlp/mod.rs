//! Natural language due dates.
//!
//! This module turns free-text date phrases into calendar dates:
//! - "tomorrow", "in 2 weeks", "next friday"
//! - "end of month", "end of next week"
//! - "every monday", "monthly" (recurring)
//!
//! and finds such phrases inside task titles ("Buy groceries tomorrow").

pub mod display;
mod parser;
pub mod patterns;

pub use display::format_date_str;
pub use parser::{
    calculate_date, extract_date_from_task, format_date_for_display, get_date_suggestions,
    parse_date_string, process_task_with_date, Confidence, DateAssistant, DateSuggestion,
    ExtractedDate, ParsedDate, ProcessedTask,
};
pub use patterns::{CalendarPolicy, EndOfNextMonth, NamedRule, Rule, WeekdayRollover};
