//! Recognised date phrases and the rules they resolve to.
//!
//! The pattern table maps a lowercase phrase to a [`Rule`]: either a fixed
//! day offset or a named calculation. The suggestion table maps short
//! prefixes to the phrases offered while the user is still typing. Every
//! suggested phrase is a key of the pattern table.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::datetime::{
    add_days, add_months_clamped, add_years_clamped, days_until_weekday, last_day_of_month,
    last_day_of_year, sunday_index,
};

/// A named calculation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamedRule {
    EndOfWeek,
    EndOfMonth,
    EndOfYear,
    EndOfNextWeek,
    EndOfNextMonth,
    EndOfNextYear,
    NextMonth,
    NextMonday,
    NextTuesday,
    NextWednesday,
    NextThursday,
    NextFriday,
    NextSaturday,
    NextSunday,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    EveryMonday,
    EveryTuesday,
    EveryWednesday,
    EveryThursday,
    EveryFriday,
    EverySaturday,
    EverySunday,
}

impl NamedRule {
    /// Every named rule, in declaration order.
    pub const ALL: [Self; 25] = [
        Self::EndOfWeek,
        Self::EndOfMonth,
        Self::EndOfYear,
        Self::EndOfNextWeek,
        Self::EndOfNextMonth,
        Self::EndOfNextYear,
        Self::NextMonth,
        Self::NextMonday,
        Self::NextTuesday,
        Self::NextWednesday,
        Self::NextThursday,
        Self::NextFriday,
        Self::NextSaturday,
        Self::NextSunday,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::EveryMonday,
        Self::EveryTuesday,
        Self::EveryWednesday,
        Self::EveryThursday,
        Self::EveryFriday,
        Self::EverySaturday,
        Self::EverySunday,
    ];

    /// The rule's canonical name, e.g. `endOfWeek` or `nextFriday`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndOfWeek => "endOfWeek",
            Self::EndOfMonth => "endOfMonth",
            Self::EndOfYear => "endOfYear",
            Self::EndOfNextWeek => "endOfNextWeek",
            Self::EndOfNextMonth => "endOfNextMonth",
            Self::EndOfNextYear => "endOfNextYear",
            Self::NextMonth => "nextMonth",
            Self::NextMonday => "nextMonday",
            Self::NextTuesday => "nextTuesday",
            Self::NextWednesday => "nextWednesday",
            Self::NextThursday => "nextThursday",
            Self::NextFriday => "nextFriday",
            Self::NextSaturday => "nextSaturday",
            Self::NextSunday => "nextSunday",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::EveryMonday => "everyMonday",
            Self::EveryTuesday => "everyTuesday",
            Self::EveryWednesday => "everyWednesday",
            Self::EveryThursday => "everyThursday",
            Self::EveryFriday => "everyFriday",
            Self::EverySaturday => "everySaturday",
            Self::EverySunday => "everySunday",
        }
    }

    /// Look up a rule by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_str() == name)
    }

    /// The weekday targeted by `next*` and `every*` rules.
    #[must_use]
    pub const fn weekday(self) -> Option<Weekday> {
        match self {
            Self::NextMonday | Self::EveryMonday => Some(Weekday::Mon),
            Self::NextTuesday | Self::EveryTuesday => Some(Weekday::Tue),
            Self::NextWednesday | Self::EveryWednesday => Some(Weekday::Wed),
            Self::NextThursday | Self::EveryThursday => Some(Weekday::Thu),
            Self::NextFriday | Self::EveryFriday => Some(Weekday::Fri),
            Self::NextSaturday | Self::EverySaturday => Some(Weekday::Sat),
            Self::NextSunday | Self::EverySunday => Some(Weekday::Sun),
            _ => None,
        }
    }
}

impl fmt::Display for NamedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a recognised phrase resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Rule {
    /// A fixed number of days from the base date.
    Offset(i64),
    /// A named calculation.
    Named(NamedRule),
}

impl Rule {
    /// Parse a rule from its textual form: an integer offset or a rule name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        input
            .parse::<i64>()
            .ok()
            .map(Self::Offset)
            .or_else(|| NamedRule::from_name(input).map(Self::Named))
    }

    /// Whether the rule describes a repeating date (`every*`).
    #[must_use]
    pub fn is_recurring(self) -> bool {
        match self {
            Self::Offset(_) => false,
            Self::Named(rule) => rule.as_str().starts_with("every"),
        }
    }

    /// Whether the rule is relative to the base date (offsets, `next*`, `endOf*`).
    #[must_use]
    pub fn is_relative(self) -> bool {
        match self {
            Self::Offset(_) => true,
            Self::Named(rule) => {
                let name = rule.as_str();
                name.starts_with("next") || name.starts_with("endOf")
            },
        }
    }

    /// Compute the calendar date this rule designates relative to `base`.
    #[must_use]
    pub fn resolve(self, base: NaiveDate, policy: CalendarPolicy) -> NaiveDate {
        match self {
            Self::Offset(days) => add_days(base, days),
            Self::Named(rule) => resolve_named(rule, base, policy),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(days) => write!(f, "{days}"),
            Self::Named(rule) => write!(f, "{rule}"),
        }
    }
}

/// How `next<weekday>` behaves when the base date already is that weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekdayRollover {
    /// Same weekday resolves to the base date itself, except Sunday, which
    /// moves a full week ahead.
    #[default]
    Compatible,
    /// Always the next occurrence strictly after the base date.
    Strict,
}

/// What `end of next month` designates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndOfNextMonth {
    /// Seven days before the last day of the month after next.
    #[default]
    WeekBeforeFollowingMonthEnd,
    /// The last day of next month.
    LastDayOfNextMonth,
}

/// Knobs for the two calendar rules whose historical behavior is debatable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarPolicy {
    pub weekday_rollover: WeekdayRollover,
    pub end_of_next_month: EndOfNextMonth,
}

impl CalendarPolicy {
    /// Policy with every rule normalised to its literal reading.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            weekday_rollover: WeekdayRollover::Strict,
            end_of_next_month: EndOfNextMonth::LastDayOfNextMonth,
        }
    }
}

fn resolve_named(rule: NamedRule, base: NaiveDate, policy: CalendarPolicy) -> NaiveDate {
    let to_saturday = 6 - sunday_index(base.weekday());

    match rule {
        NamedRule::EndOfWeek => add_days(base, to_saturday),
        NamedRule::EndOfMonth => last_day_of_month(base),
        NamedRule::EndOfYear => last_day_of_year(base.year()).unwrap_or(base),
        NamedRule::EndOfNextWeek => add_days(base, 7 + to_saturday),
        NamedRule::EndOfNextMonth => match policy.end_of_next_month {
            EndOfNextMonth::WeekBeforeFollowingMonthEnd => {
                add_days(last_day_of_month(add_months_clamped(base, 2)), -7)
            },
            EndOfNextMonth::LastDayOfNextMonth => last_day_of_month(add_months_clamped(base, 1)),
        },
        NamedRule::EndOfNextYear => last_day_of_year(base.year() + 1).unwrap_or(base),
        NamedRule::NextMonth | NamedRule::Monthly => add_months_clamped(base, 1),
        NamedRule::Daily => add_days(base, 1),
        NamedRule::Weekly => add_days(base, 7),
        NamedRule::Yearly => add_years_clamped(base, 1),
        weekday_rule => weekday_rule
            .weekday()
            .map_or(base, |target| next_weekday(base, target, policy.weekday_rollover)),
    }
}

fn next_weekday(base: NaiveDate, target: Weekday, rollover: WeekdayRollover) -> NaiveDate {
    let days = match days_until_weekday(base, target) {
        0 => match rollover {
            WeekdayRollover::Compatible if target != Weekday::Sun => 0,
            WeekdayRollover::Compatible | WeekdayRollover::Strict => 7,
        },
        days => days,
    };

    add_days(base, days)
}

const fn named(rule: NamedRule) -> Rule {
    Rule::Named(rule)
}

/// Recognised phrases, in lookup priority order.
static PATTERNS: &[(&str, Rule)] = &[
    ("today", Rule::Offset(0)),
    ("tomorrow", Rule::Offset(1)),
    ("yesterday", Rule::Offset(-1)),
    ("day after tomorrow", Rule::Offset(2)),
    ("in 2 days", Rule::Offset(2)),
    ("in 3 days", Rule::Offset(3)),
    ("in a week", Rule::Offset(7)),
    ("in 1 week", Rule::Offset(7)),
    ("in 2 weeks", Rule::Offset(14)),
    ("in two weeks", Rule::Offset(14)),
    ("in a month", Rule::Offset(30)),
    ("next week", Rule::Offset(7)),
    ("next month", named(NamedRule::NextMonth)),
    ("this weekend", named(NamedRule::EndOfWeek)),
    ("end of week", named(NamedRule::EndOfWeek)),
    ("end of the week", named(NamedRule::EndOfWeek)),
    ("end of month", named(NamedRule::EndOfMonth)),
    ("end of the month", named(NamedRule::EndOfMonth)),
    ("end of year", named(NamedRule::EndOfYear)),
    ("end of the year", named(NamedRule::EndOfYear)),
    ("end of next week", named(NamedRule::EndOfNextWeek)),
    ("end of next month", named(NamedRule::EndOfNextMonth)),
    ("end of next year", named(NamedRule::EndOfNextYear)),
    ("next monday", named(NamedRule::NextMonday)),
    ("next tuesday", named(NamedRule::NextTuesday)),
    ("next wednesday", named(NamedRule::NextWednesday)),
    ("next thursday", named(NamedRule::NextThursday)),
    ("next friday", named(NamedRule::NextFriday)),
    ("next saturday", named(NamedRule::NextSaturday)),
    ("next sunday", named(NamedRule::NextSunday)),
    ("monday", named(NamedRule::NextMonday)),
    ("tuesday", named(NamedRule::NextTuesday)),
    ("wednesday", named(NamedRule::NextWednesday)),
    ("thursday", named(NamedRule::NextThursday)),
    ("friday", named(NamedRule::NextFriday)),
    ("saturday", named(NamedRule::NextSaturday)),
    ("sunday", named(NamedRule::NextSunday)),
    ("daily", named(NamedRule::Daily)),
    ("every day", named(NamedRule::Daily)),
    ("weekly", named(NamedRule::Weekly)),
    ("every week", named(NamedRule::Weekly)),
    ("monthly", named(NamedRule::Monthly)),
    ("every month", named(NamedRule::Monthly)),
    ("yearly", named(NamedRule::Yearly)),
    ("annually", named(NamedRule::Yearly)),
    ("every year", named(NamedRule::Yearly)),
    ("every monday", named(NamedRule::EveryMonday)),
    ("every tuesday", named(NamedRule::EveryTuesday)),
    ("every wednesday", named(NamedRule::EveryWednesday)),
    ("every thursday", named(NamedRule::EveryThursday)),
    ("every friday", named(NamedRule::EveryFriday)),
    ("every saturday", named(NamedRule::EverySaturday)),
    ("every sunday", named(NamedRule::EverySunday)),
];

/// Autocomplete candidates keyed by what the user has typed so far.
static SUGGESTIONS: &[(&str, &[&str])] = &[
    ("to", &["today", "tomorrow"]),
    ("tod", &["today"]),
    ("tom", &["tomorrow"]),
    ("nex", &["next week", "next month", "next monday", "next friday"]),
    (
        "next",
        &[
            "next week",
            "next month",
            "next monday",
            "next tuesday",
            "next wednesday",
            "next thursday",
            "next friday",
            "next saturday",
            "next sunday",
        ],
    ),
    (
        "end",
        &[
            "end of week",
            "end of month",
            "end of year",
            "end of next week",
            "end of next month",
        ],
    ),
    ("in", &["in 2 days", "in 3 days", "in a week", "in 2 weeks", "in a month"]),
    ("this", &["this weekend"]),
    (
        "every",
        &[
            "every day",
            "every week",
            "every month",
            "every year",
            "every monday",
            "every friday",
        ],
    ),
    ("daily", &["daily", "every day"]),
    ("weekly", &["weekly", "every week"]),
    ("monthly", &["monthly", "every month"]),
    ("yearly", &["yearly", "every year"]),
];

static PATTERN_INDEX: Lazy<HashMap<&'static str, Rule>> =
    Lazy::new(|| PATTERNS.iter().copied().collect());

static SUGGESTION_INDEX: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| SUGGESTIONS.iter().copied().collect());

static MAX_PHRASE_WORDS: Lazy<usize> = Lazy::new(|| {
    PATTERNS
        .iter()
        .map(|(phrase, _)| phrase.split_whitespace().count())
        .max()
        .unwrap_or(1)
});

/// All recognised phrases with their rules, in table order.
#[must_use]
pub fn patterns() -> &'static [(&'static str, Rule)] {
    PATTERNS
}

/// All suggestion prefixes with their candidate phrases, in table order.
#[must_use]
pub fn suggestion_table() -> &'static [(&'static str, &'static [&'static str])] {
    SUGGESTIONS
}

/// The rule for an exact, already-normalised phrase.
#[must_use]
pub fn pattern_rule(phrase: &str) -> Option<Rule> {
    PATTERN_INDEX.get(phrase).copied()
}

/// The candidate phrases for an exact, already-normalised prefix.
#[must_use]
pub fn suggestions_for(prefix: &str) -> Option<&'static [&'static str]> {
    SUGGESTION_INDEX.get(prefix).copied()
}

/// Word count of the longest recognised phrase.
#[must_use]
pub fn max_phrase_words() -> usize {
    *MAX_PHRASE_WORDS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolve(rule: NamedRule, base: NaiveDate) -> NaiveDate {
        Rule::Named(rule).resolve(base, CalendarPolicy::default())
    }

    // 2024-01-03 is a Wednesday.
    fn wed() -> NaiveDate {
        date(2024, 1, 3)
    }

    // ===================
    // Table Integrity
    // ===================

    #[test]
    fn test_every_suggestion_is_a_pattern() {
        for (prefix, phrases) in suggestion_table() {
            for phrase in *phrases {
                assert!(
                    pattern_rule(phrase).is_some(),
                    "suggestion {phrase:?} under {prefix:?} is not a recognised phrase"
                );
            }
        }
    }

    #[test]
    fn test_patterns_are_unique_and_normalised() {
        let mut seen = std::collections::HashSet::new();
        for (phrase, _) in patterns() {
            assert!(seen.insert(*phrase), "duplicate phrase {phrase:?}");
            assert_eq!(*phrase, phrase.trim().to_lowercase());
        }
    }

    #[test]
    fn test_every_named_rule_has_a_phrase() {
        for rule in NamedRule::ALL {
            assert!(
                patterns().iter().any(|(_, r)| *r == Rule::Named(rule)),
                "{rule} has no phrase"
            );
        }
    }

    #[test]
    fn test_rule_names_round_trip() {
        for rule in NamedRule::ALL {
            assert_eq!(NamedRule::from_name(rule.as_str()), Some(rule));
        }
        assert_eq!(NamedRule::from_name("endOfTime"), None);
    }

    #[test]
    fn test_max_phrase_words() {
        assert_eq!(max_phrase_words(), 4);
    }

    // ===================
    // Rule Parsing
    // ===================

    #[test]
    fn test_rule_parse() {
        assert_eq!(Rule::parse("3"), Some(Rule::Offset(3)));
        assert_eq!(Rule::parse("-1"), Some(Rule::Offset(-1)));
        assert_eq!(Rule::parse("endOfWeek"), Some(Rule::Named(NamedRule::EndOfWeek)));
        assert_eq!(Rule::parse("fortnightly"), None);
    }

    #[test]
    fn test_rule_flags() {
        assert!(Rule::Offset(1).is_relative());
        assert!(!Rule::Offset(1).is_recurring());
        assert!(Rule::Named(NamedRule::NextFriday).is_relative());
        assert!(Rule::Named(NamedRule::EndOfMonth).is_relative());
        assert!(Rule::Named(NamedRule::EveryMonday).is_recurring());
        assert!(!Rule::Named(NamedRule::EveryMonday).is_relative());
        assert!(!Rule::Named(NamedRule::Daily).is_recurring());
        assert!(!Rule::Named(NamedRule::Daily).is_relative());
    }

    #[test]
    fn test_rule_serializes_as_number_or_name() {
        assert_eq!(serde_json::to_string(&Rule::Offset(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&Rule::Named(NamedRule::EndOfNextMonth)).unwrap(),
            "\"endOfNextMonth\""
        );
    }

    // ===================
    // Calculation
    // ===================

    #[test]
    fn test_offsets() {
        let base = wed();
        let policy = CalendarPolicy::default();
        assert_eq!(Rule::Offset(0).resolve(base, policy), base);
        assert_eq!(Rule::Offset(1).resolve(base, policy), date(2024, 1, 4));
        assert_eq!(Rule::Offset(-1).resolve(base, policy), date(2024, 1, 2));
        assert_eq!(Rule::Offset(30).resolve(base, policy), date(2024, 2, 2));
    }

    #[test]
    fn test_huge_offsets_leave_base_unchanged() {
        let base = wed();
        let policy = CalendarPolicy::default();
        assert_eq!(Rule::Offset(i64::MAX).resolve(base, policy), base);
        assert_eq!(Rule::Offset(i64::MIN).resolve(base, policy), base);
    }

    #[test]
    fn test_end_of_week() {
        assert_eq!(resolve(NamedRule::EndOfWeek, wed()), date(2024, 1, 6));
        // Saturday is its own end of week
        assert_eq!(resolve(NamedRule::EndOfWeek, date(2024, 1, 6)), date(2024, 1, 6));
        // Sunday starts a new week
        assert_eq!(resolve(NamedRule::EndOfWeek, date(2024, 1, 7)), date(2024, 1, 13));
    }

    #[test]
    fn test_end_of_next_week() {
        assert_eq!(resolve(NamedRule::EndOfNextWeek, wed()), date(2024, 1, 13));
        assert_eq!(resolve(NamedRule::EndOfNextWeek, date(2024, 1, 6)), date(2024, 1, 13));
    }

    #[test]
    fn test_end_of_month_and_year() {
        assert_eq!(resolve(NamedRule::EndOfMonth, date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(resolve(NamedRule::EndOfYear, wed()), date(2024, 12, 31));
        assert_eq!(resolve(NamedRule::EndOfNextYear, wed()), date(2025, 12, 31));
    }

    #[test]
    fn test_end_of_next_month_compatible() {
        // Month after next is March 2024 (31 days); one week earlier is Mar 24
        assert_eq!(resolve(NamedRule::EndOfNextMonth, date(2024, 1, 15)), date(2024, 3, 24));
        // From Dec 31: month after next is Feb 2025 (28 days)
        assert_eq!(resolve(NamedRule::EndOfNextMonth, date(2024, 12, 31)), date(2025, 2, 21));
    }

    #[test]
    fn test_end_of_next_month_literal() {
        let policy = CalendarPolicy {
            end_of_next_month: EndOfNextMonth::LastDayOfNextMonth,
            ..CalendarPolicy::default()
        };
        let rule = Rule::Named(NamedRule::EndOfNextMonth);
        assert_eq!(rule.resolve(date(2024, 1, 15), policy), date(2024, 2, 29));
        assert_eq!(rule.resolve(date(2024, 12, 31), policy), date(2025, 1, 31));
    }

    #[test]
    fn test_next_month_clamps() {
        assert_eq!(resolve(NamedRule::NextMonth, date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(resolve(NamedRule::NextMonth, date(2023, 1, 31)), date(2023, 2, 28));
        assert_eq!(resolve(NamedRule::NextMonth, date(2024, 12, 15)), date(2025, 1, 15));
    }

    #[test]
    fn test_next_weekday_forward() {
        assert_eq!(resolve(NamedRule::NextFriday, wed()), date(2024, 1, 5));
        assert_eq!(resolve(NamedRule::NextMonday, wed()), date(2024, 1, 8));
        assert_eq!(resolve(NamedRule::NextSunday, wed()), date(2024, 1, 7));
        assert_eq!(resolve(NamedRule::NextTuesday, wed()), date(2024, 1, 9));
    }

    #[test]
    fn test_next_weekday_same_day_compatible() {
        // Same weekday resolves to the base date...
        assert_eq!(resolve(NamedRule::NextWednesday, wed()), wed());
        let monday = date(2024, 1, 8);
        assert_eq!(resolve(NamedRule::NextMonday, monday), monday);
        // ...except Sunday, which jumps a week
        let sunday = date(2024, 1, 7);
        assert_eq!(resolve(NamedRule::NextSunday, sunday), date(2024, 1, 14));
    }

    #[test]
    fn test_next_weekday_same_day_strict() {
        let policy = CalendarPolicy {
            weekday_rollover: WeekdayRollover::Strict,
            ..CalendarPolicy::default()
        };
        assert_eq!(
            Rule::Named(NamedRule::NextWednesday).resolve(wed(), policy),
            date(2024, 1, 10)
        );
        assert_eq!(
            Rule::Named(NamedRule::NextSunday).resolve(date(2024, 1, 7), policy),
            date(2024, 1, 14)
        );
    }

    #[test]
    fn test_recurring_rules_resolve_to_first_occurrence() {
        assert_eq!(resolve(NamedRule::Daily, wed()), date(2024, 1, 4));
        assert_eq!(resolve(NamedRule::Weekly, wed()), date(2024, 1, 10));
        assert_eq!(resolve(NamedRule::Monthly, date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(resolve(NamedRule::Yearly, date(2024, 2, 29)), date(2025, 2, 28));
        assert_eq!(resolve(NamedRule::EveryFriday, wed()), date(2024, 1, 5));
    }

    #[test]
    fn test_strict_policy_constructor() {
        let policy = CalendarPolicy::strict();
        assert_eq!(policy.weekday_rollover, WeekdayRollover::Strict);
        assert_eq!(policy.end_of_next_month, EndOfNextMonth::LastDayOfNextMonth);
    }
}
