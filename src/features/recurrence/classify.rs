//! Deciding which date a recurring task repeats from.
//!
//! Bills and birthdays repeat on a fixed calendar date no matter when they
//! were ticked off; everything else repeats from the day it was done. The
//! split is made by sniffing tags and title words.

use serde::Serialize;

use crate::tasks::TaskRecord;

const OCCASION_WORDS: &[&str] = &["birthday", "anniversary"];
const PAYMENT_TAGS: &[&str] = &["bills", "rent", "mortgage"];
const PAYMENT_WORDS: &[&str] = &["rent", "mortgage", "bill", "payment", "due"];

/// How a recurring task picks its anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskClass {
    /// Repeats from the completion date.
    Flexible,
    /// Repeats from the original due date.
    DateSensitive,
}

/// Whether the task marks a birthday or anniversary.
#[must_use]
pub fn is_occasion(task: &TaskRecord) -> bool {
    let title = task.title.to_lowercase();
    OCCASION_WORDS
        .iter()
        .any(|word| task.has_tag(word) || title.contains(word))
}

/// Classify a task as flexible or date-sensitive.
#[must_use]
pub fn classify(task: &TaskRecord) -> TaskClass {
    let title = task.title.to_lowercase();
    let is_payment = PAYMENT_TAGS.iter().any(|tag| task.has_tag(tag))
        || PAYMENT_WORDS.iter().any(|word| title.contains(word));

    if is_occasion(task) || is_payment {
        TaskClass::DateSensitive
    } else {
        TaskClass::Flexible
    }
}
