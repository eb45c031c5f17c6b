use chrono::NaiveDate;
use colored::Colorize;

use crate::features::nlp::display::format_date_for_display;
use crate::features::nlp::{DateSuggestion, ParsedDate, ProcessedTask};
use crate::features::recurrence::Completion;
use crate::tasks::TaskRecord;

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[TaskRecord], title: &str, today: NaiveDate) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{} ({} items)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        output.push_str(&task_line(task, today));
        output.push('\n');
    }

    output
}

fn status_icon(task: &TaskRecord) -> colored::ColoredString {
    if task.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    }
}

fn task_line(task: &TaskRecord, today: NaiveDate) -> String {
    let mut line = format!(
        "{} {} {}",
        format!("{:>4}", task.id).dimmed(),
        status_icon(task),
        task.title.bold()
    );

    if let Some(due) = task.due_date {
        let label = format_date_for_display(due, today);
        if !task.completed && due < today {
            line.push_str(&format!("  {}", label.red()));
        } else {
            line.push_str(&format!("  {}", label.yellow()));
        }
    }

    if let Some(recurrence) = &task.recurrence {
        line.push_str(&format!("  {}", format!("↻ {recurrence}").magenta()));
    }

    if !task.tags.is_empty() {
        let tags_str = task
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        line.push_str(&format!("  {}", tags_str.cyan()));
    }

    line
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &TaskRecord, today: NaiveDate) -> String {
    let mut output = format!("{} {}\n", status_icon(task), task.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Status".dimmed(),
        if task.completed { "completed" } else { "open" }
    ));

    if let Some(notes) = task.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), notes));
    }

    if let Some(due) = task.due_date {
        output.push_str(&format!(
            "  {}: {} ({})\n",
            "Due".dimmed(),
            format_date_for_display(due, today),
            due
        ));
    }

    if let Some(recurrence) = &task.recurrence {
        output.push_str(&format!("  {}: {}\n", "Repeats".dimmed(), recurrence));
    }

    if !task.tags.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Tags".dimmed(), task.tags.join(", ")));
    }

    if let Some(parent) = &task.parent_task_id {
        output.push_str(&format!("  {}: {}\n", "Follows".dimmed(), parent));
    }

    if let Some(created) = &task.entry_date {
        output.push_str(&format!(
            "  {}: {}\n",
            "Created".dimmed(),
            created.format("%Y-%m-%d %H:%M")
        ));
    }

    if let Some(done) = &task.completed_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Completed".dimmed(),
            done.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}

/// Format the result of parsing a standalone date phrase
pub fn format_parsed_pretty(input: &str, parsed: Option<&ParsedDate>, today: NaiveDate) -> String {
    let Some(parsed) = parsed else {
        return format!("No date recognised in \"{input}\"");
    };

    match parsed.date {
        Some(date) => {
            let mut output = format!(
                "{} → {} ({})",
                parsed.normalized.bold(),
                format_date_for_display(date, today).yellow(),
                date
            );
            if parsed.is_recurring {
                output.push_str(&format!("  {}", "recurring".magenta()));
            }
            output
        },
        None => {
            let mut output = format!("{} could be:\n", parsed.normalized.bold());
            for suggestion in &parsed.suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
            output
        },
    }
}

/// Format autocomplete suggestions
pub fn format_suggestions_pretty(
    partial: &str,
    suggestions: &[DateSuggestion],
    today: NaiveDate,
) -> String {
    if suggestions.is_empty() {
        return format!("No suggestions for \"{partial}\"");
    }

    let width = suggestions.iter().map(|s| s.text.len()).max().unwrap_or(0);
    let mut output = format!("Suggestions for \"{partial}\"\n");
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for suggestion in suggestions {
        output.push_str(&format!(
            "  {:<width$}  {}\n",
            suggestion.text,
            format_date_for_display(suggestion.date, today).yellow(),
        ));
    }

    output
}

/// Format a task title split into title and due date
pub fn format_processed_pretty(task: &ProcessedTask, today: NaiveDate) -> String {
    let mut output = format!("{}: {}\n", "Title".dimmed(), task.title.bold());

    match (&task.extracted, task.due_date) {
        (Some(extracted), Some(due)) => {
            output.push_str(&format!(
                "{}: {} ({})  from \"{}\"\n",
                "Due".dimmed(),
                format_date_for_display(due, today).yellow(),
                due,
                extracted.text
            ));
            if extracted.parsed.is_recurring {
                output.push_str(&format!("{}: {}\n", "Repeats".dimmed(), extracted.parsed.normalized));
            }
        },
        _ => output.push_str(&format!("{}: none\n", "Due".dimmed())),
    }

    output
}

/// Format the outcome of completing a task
pub fn format_completion_pretty(completion: &Completion, today: NaiveDate) -> String {
    let mut output = format!(
        "Completed: {} (ID: {})",
        completion.task.title, completion.task.id
    );

    if let Some(next) = &completion.next {
        let due = next
            .due_date
            .map_or_else(|| "no date".to_string(), |d| format_date_for_display(d, today));
        output.push_str(&format!(
            "\nNext occurrence: {} (ID: {}) due {}",
            next.title,
            next.id,
            due.yellow()
        ));
    }

    output
}
