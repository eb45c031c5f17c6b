//! Date phrase parsing, autocomplete, and extraction from task titles.
//!
//! Turns strings like "Buy groceries tomorrow" into a cleaned title plus a
//! resolved due date.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{Clock, SystemClock};

use super::display;
use super::patterns::{max_phrase_words, pattern_rule, suggestions_for, CalendarPolicy, Rule};

/// How firmly a phrase was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Exact phrase match with a resolved date.
    High,
    /// Known prefix; only candidate completions are available.
    Partial,
    /// An autocomplete entry.
    Suggestion,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Partial => "partial",
            Self::Suggestion => "suggestion",
        })
    }
}

/// Result of resolving a date phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDate {
    /// The input as given.
    pub original: String,
    /// Lowercased, trimmed input.
    pub normalized: String,
    /// The rule the phrase maps to (`None` for partial matches).
    pub rule: Option<Rule>,
    /// The resolved date (`None` for partial matches).
    pub date: Option<NaiveDate>,
    pub is_recurring: bool,
    pub is_relative: bool,
    pub confidence: Confidence,
    /// Candidate completions for partial matches.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ParsedDate {
    fn exact(original: &str, normalized: String, rule: Rule, date: NaiveDate) -> Self {
        Self {
            original: original.to_string(),
            normalized,
            rule: Some(rule),
            date: Some(date),
            is_recurring: rule.is_recurring(),
            is_relative: rule.is_relative(),
            confidence: Confidence::High,
            suggestions: Vec::new(),
        }
    }

    fn partial(original: &str, normalized: String, candidates: &[&str]) -> Self {
        Self {
            original: original.to_string(),
            normalized,
            rule: None,
            date: None,
            is_recurring: false,
            is_relative: false,
            confidence: Confidence::Partial,
            suggestions: candidates.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether this is an exact match with a resolved date.
    #[must_use]
    pub fn is_high(&self) -> bool {
        self.confidence == Confidence::High
    }
}

/// One autocomplete entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSuggestion {
    pub text: String,
    pub date: NaiveDate,
    pub confidence: Confidence,
}

/// A date phrase found inside a longer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDate {
    /// The matched text in its original casing.
    pub text: String,
    pub parsed: ParsedDate,
    /// Byte offset where the match starts in the original text.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
}

/// A task title with its date phrase pulled out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTask {
    /// Title with the date phrase removed and whitespace collapsed.
    pub title: String,
    pub has_date: bool,
    pub extracted: Option<ExtractedDate>,
    pub due_date: Option<NaiveDate>,
}

impl ProcessedTask {
    /// The parse result of the extracted phrase, if any.
    #[must_use]
    pub fn parsed(&self) -> Option<&ParsedDate> {
        self.extracted.as_ref().map(|e| &e.parsed)
    }

    /// Whether the extracted phrase describes a repeating date.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.parsed().is_some_and(|p| p.is_recurring)
    }
}

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+").unwrap_or_else(|e| panic!("Invalid word regex: {e}")));

/// Entry point for all date operations, bound to a clock and a calendar policy.
#[derive(Debug, Clone)]
pub struct DateAssistant<C: Clock = SystemClock> {
    clock: C,
    policy: CalendarPolicy,
}

impl Default for DateAssistant<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> DateAssistant<C> {
    /// Create an assistant with the default calendar policy.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            policy: CalendarPolicy::default(),
        }
    }

    /// Replace the calendar policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CalendarPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> CalendarPolicy {
        self.policy
    }

    /// Today's date according to the clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Resolve a rule given in textual form (`"3"`, `"endOfMonth"`).
    ///
    /// `base` defaults to today. Unrecognised rules return `base` unchanged.
    #[must_use]
    pub fn calculate_date(&self, rule: &str, base: Option<NaiveDate>) -> NaiveDate {
        let base = base.unwrap_or_else(|| self.today());
        Rule::parse(rule).map_or(base, |rule| rule.resolve(base, self.policy))
    }

    /// Resolve a typed rule. `base` defaults to today.
    #[must_use]
    pub fn resolve(&self, rule: Rule, base: Option<NaiveDate>) -> NaiveDate {
        rule.resolve(base.unwrap_or_else(|| self.today()), self.policy)
    }

    /// Parse a standalone date phrase.
    ///
    /// Exact phrases win over suggestion prefixes. Returns `None` for empty
    /// or unrecognised input.
    #[must_use]
    pub fn parse_date_string(&self, text: &str) -> Option<ParsedDate> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        if let Some(rule) = pattern_rule(&normalized) {
            let date = self.resolve(rule, None);
            return Some(ParsedDate::exact(text, normalized, rule, date));
        }

        suggestions_for(&normalized)
            .map(|candidates| ParsedDate::partial(text, normalized, candidates))
    }

    /// Autocomplete entries for what the user has typed so far, in table order.
    #[must_use]
    pub fn get_date_suggestions(&self, partial: &str) -> Vec<DateSuggestion> {
        let normalized = partial.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        let today = self.today();
        suggestions_for(&normalized)
            .unwrap_or_default()
            .iter()
            .filter_map(|phrase| {
                pattern_rule(phrase).map(|rule| DateSuggestion {
                    text: (*phrase).to_string(),
                    date: rule.resolve(today, self.policy),
                    confidence: Confidence::Suggestion,
                })
            })
            .collect()
    }

    /// Label a date as "Today", "Tomorrow", or a short weekday/month form.
    #[must_use]
    pub fn format_date_for_display(&self, date: NaiveDate) -> String {
        display::format_date_for_display(date, self.today())
    }

    /// Find the first date phrase in `text`.
    ///
    /// Scans left to right. At each word it tries the single word first, then
    /// progressively longer windows up to the longest known phrase; the first
    /// exact match wins.
    #[must_use]
    pub fn extract_date_from_task(&self, text: &str) -> Option<ExtractedDate> {
        let words: Vec<(usize, usize, String)> = WORD_PATTERN
            .find_iter(text)
            .map(|m| (m.start(), m.end(), m.as_str().to_lowercase()))
            .collect();
        let max_len = max_phrase_words();

        for start in 0..words.len() {
            for len in 1..=max_len.min(words.len() - start) {
                let window = &words[start..start + len];
                let phrase = window
                    .iter()
                    .map(|(_, _, word)| word.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");

                if let Some(rule) = pattern_rule(&phrase) {
                    let begin = window[0].0;
                    let end = window[len - 1].1;
                    let matched = &text[begin..end];
                    let date = self.resolve(rule, None);

                    return Some(ExtractedDate {
                        text: matched.to_string(),
                        parsed: ParsedDate::exact(matched, phrase, rule, date),
                        start: begin,
                        end,
                    });
                }
            }
        }

        None
    }

    /// Strip the first date phrase from a task title and resolve it.
    #[must_use]
    pub fn process_task_with_date(&self, text: &str) -> ProcessedTask {
        let Some(extracted) = self.extract_date_from_task(text) else {
            return ProcessedTask {
                title: text.to_string(),
                has_date: false,
                extracted: None,
                due_date: None,
            };
        };

        let remaining = format!("{} {}", &text[..extracted.start], &text[extracted.end..]);
        let due_date = if extracted.parsed.is_high() {
            extracted.parsed.date
        } else {
            None
        };

        ProcessedTask {
            title: clean_title(&remaining),
            has_date: true,
            extracted: Some(extracted),
            due_date,
        }
    }
}

/// Collapse runs of whitespace and trim.
fn clean_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a rule in textual form against the system clock.
#[must_use]
pub fn calculate_date(rule: &str, base: Option<NaiveDate>) -> NaiveDate {
    DateAssistant::default().calculate_date(rule, base)
}

/// Parse a standalone date phrase against the system clock.
#[must_use]
pub fn parse_date_string(text: &str) -> Option<ParsedDate> {
    DateAssistant::default().parse_date_string(text)
}

/// Autocomplete entries against the system clock.
#[must_use]
pub fn get_date_suggestions(partial: &str) -> Vec<DateSuggestion> {
    DateAssistant::default().get_date_suggestions(partial)
}

/// Display label for `date` relative to the system clock.
#[must_use]
pub fn format_date_for_display(date: NaiveDate) -> String {
    DateAssistant::default().format_date_for_display(date)
}

/// Find the first date phrase in `text` against the system clock.
#[must_use]
pub fn extract_date_from_task(text: &str) -> Option<ExtractedDate> {
    DateAssistant::default().extract_date_from_task(text)
}

/// Strip and resolve the first date phrase in `text`.
///
/// # Examples
///
/// ```
/// use tend::features::nlp::process_task_with_date;
///
/// let task = process_task_with_date("Buy groceries tomorrow");
/// assert_eq!(task.title, "Buy groceries");
/// assert!(task.has_date);
/// assert!(task.due_date.is_some());
/// ```
#[must_use]
pub fn process_task_with_date(text: &str) -> ProcessedTask {
    DateAssistant::default().process_task_with_date(text)
}
