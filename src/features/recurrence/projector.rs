//! Next-occurrence calculation for recurring tasks.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::datetime::{add_days, add_months_clamped, add_years_clamped};
use crate::core::Clock;
use crate::error::TendError;
use crate::features::nlp::{NamedRule, Rule};
use crate::tasks::{push_tag, TaskRecord, TaskSeed, RECURRING_TAG};

use super::classify::{classify, TaskClass};

/// How often a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Recurrence {
    pub const ALL: [Self; 6] = [
        Self::Daily,
        Self::Weekly,
        Self::Biweekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Yearly,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Whether this cadence may repeat from the original due date.
    ///
    /// Day and week cadences always repeat from the completion date.
    #[must_use]
    pub const fn honors_anchor(self) -> bool {
        matches!(self, Self::Monthly | Self::Quarterly | Self::Yearly)
    }

    /// Step `date` forward by one period.
    ///
    /// Month-based steps clamp to the end of shorter months; Feb 29 steps to
    /// Feb 28 in non-leap years.
    #[must_use]
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => add_days(date, 1),
            Self::Weekly => add_days(date, 7),
            Self::Biweekly => add_days(date, 14),
            Self::Monthly => add_months_clamped(date, 1),
            Self::Quarterly => add_months_clamped(date, 3),
            Self::Yearly => add_years_clamped(date, 1),
        }
    }

    /// The cadence implied by a recurring date phrase ("every friday", "monthly").
    #[must_use]
    pub const fn from_rule(rule: Rule) -> Option<Self> {
        match rule {
            Rule::Offset(_) => None,
            Rule::Named(named) => match named {
                NamedRule::Daily => Some(Self::Daily),
                NamedRule::Weekly
                | NamedRule::EveryMonday
                | NamedRule::EveryTuesday
                | NamedRule::EveryWednesday
                | NamedRule::EveryThursday
                | NamedRule::EveryFriday
                | NamedRule::EverySaturday
                | NamedRule::EverySunday => Some(Self::Weekly),
                NamedRule::Monthly => Some(Self::Monthly),
                NamedRule::Yearly => Some(Self::Yearly),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = TendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                TendError::InvalidArgument(format!(
                    "Unknown recurrence '{s}' (expected one of: daily, weekly, biweekly, monthly, quarterly, yearly)"
                ))
            })
    }
}

/// The date the next occurrence is measured from.
///
/// The original due date for date-sensitive tasks that have one, otherwise
/// the completion date.
#[must_use]
pub fn anchor_date(task: &TaskRecord, completed_on: NaiveDate) -> NaiveDate {
    match (classify(task), task.due_date) {
        (TaskClass::DateSensitive, Some(due)) => due,
        _ => completed_on,
    }
}

/// Next due date for a task completed at `completed_at`.
///
/// Returns `None` if the task has no recognised recurrence.
#[must_use]
pub fn next_due_date(task: &TaskRecord, completed_at: NaiveDateTime) -> Option<NaiveDate> {
    let recurrence: Recurrence = task.recurrence.as_deref()?.parse().ok()?;
    let completed_on = completed_at.date();

    let from = if recurrence.honors_anchor() {
        anchor_date(task, completed_on)
    } else {
        completed_on
    };

    debug!(
        task_id = %task.id,
        %recurrence,
        anchor = %from,
        "projecting next occurrence"
    );

    Some(recurrence.advance(from))
}

/// Build the next occurrence of a just-completed recurring task.
///
/// The seed copies identity, title, description, and tags (adding
/// `recurring`), links back to the completed task, and is stamped with the
/// clock's current time. Returns `None` when the task does not recur.
#[must_use]
pub fn next_occurrence<C: Clock>(
    task: &TaskRecord,
    completed_at: NaiveDateTime,
    clock: &C,
) -> Option<TaskSeed> {
    let due_date = next_due_date(task, completed_at)?;

    let mut tags = task.tags.clone();
    push_tag(&mut tags, RECURRING_TAG);

    Some(TaskSeed {
        user_id: task.user_id.clone(),
        user_name: task.user_name.clone(),
        title: task.title.clone(),
        description: task.description.clone().unwrap_or_default(),
        entry_date: clock.now(),
        tags,
        due_date: Some(due_date),
        completed: false,
        recurrence: task.recurrence.clone(),
        parent_task_id: Some(task.id.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(18, 30, 0).unwrap()
    }

    fn task(title: &str, tags: &[&str], due: Option<NaiveDate>, recurrence: &str) -> TaskRecord {
        TaskRecord {
            id: "42".to_string(),
            user_id: "u1".to_string(),
            user_name: "Sam".to_string(),
            title: title.to_string(),
            description: None,
            entry_date: None,
            tags: tags.iter().map(ToString::to_string).collect(),
            due_date: due,
            recurrence: Some(recurrence.to_string()),
            completed: true,
            completed_at: None,
            parent_task_id: None,
        }
    }

    // ==================
    // Recurrence parsing
    // ==================

    #[test]
    fn test_recurrence_from_str() {
        assert_eq!("monthly".parse::<Recurrence>().unwrap(), Recurrence::Monthly);
        assert_eq!(" Biweekly ".parse::<Recurrence>().unwrap(), Recurrence::Biweekly);
        assert!("fortnightly".parse::<Recurrence>().is_err());
    }

    #[test]
    fn test_recurrence_from_rule() {
        assert_eq!(
            Recurrence::from_rule(Rule::Named(NamedRule::EveryFriday)),
            Some(Recurrence::Weekly)
        );
        assert_eq!(
            Recurrence::from_rule(Rule::Named(NamedRule::Monthly)),
            Some(Recurrence::Monthly)
        );
        assert_eq!(Recurrence::from_rule(Rule::Named(NamedRule::NextFriday)), None);
        assert_eq!(Recurrence::from_rule(Rule::Offset(1)), None);
    }

    // ==================
    // Flexible cadences
    // ==================

    #[test]
    fn test_daily_weekly_biweekly_from_completion() {
        let due = Some(date(2024, 1, 1));
        let done = at(2024, 1, 10);
        assert_eq!(next_due_date(&task("Stretch", &[], due, "daily"), done), Some(date(2024, 1, 11)));
        assert_eq!(next_due_date(&task("Review", &[], due, "weekly"), done), Some(date(2024, 1, 17)));
        assert_eq!(
            next_due_date(&task("Clean", &[], due, "biweekly"), done),
            Some(date(2024, 1, 24))
        );
    }

    #[test]
    fn test_weekly_ignores_due_date_even_when_date_sensitive() {
        let rent = task("Rent", &["rent"], Some(date(2024, 1, 1)), "weekly");
        assert_eq!(next_due_date(&rent, at(2024, 1, 10)), Some(date(2024, 1, 17)));
    }

    #[test]
    fn test_flexible_monthly_uses_completion() {
        let t = task("Haircut", &[], Some(date(2024, 1, 5)), "monthly");
        assert_eq!(next_due_date(&t, at(2024, 1, 20)), Some(date(2024, 2, 20)));
    }

    // ==================
    // Date-sensitive cadences
    // ==================

    #[test]
    fn test_rent_anchors_to_due_date() {
        let t = task("Transfer", &["rent"], Some(date(2024, 1, 5)), "monthly");
        assert_eq!(next_due_date(&t, at(2024, 1, 20)), Some(date(2024, 2, 5)));
    }

    #[test]
    fn test_date_sensitive_without_due_date_uses_completion() {
        let t = task("Pay rent", &[], None, "monthly");
        assert_eq!(next_due_date(&t, at(2024, 1, 20)), Some(date(2024, 2, 20)));
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        let t = task("Card bill", &[], Some(date(2023, 1, 31)), "monthly");
        assert_eq!(next_due_date(&t, at(2023, 2, 2)), Some(date(2023, 2, 28)));

        let t = task("Card bill", &[], Some(date(2024, 1, 31)), "monthly");
        assert_eq!(next_due_date(&t, at(2024, 2, 2)), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_quarterly() {
        let t = task("Estimated tax payment", &[], Some(date(2024, 1, 15)), "quarterly");
        assert_eq!(next_due_date(&t, at(2024, 1, 10)), Some(date(2024, 4, 15)));

        let t = task("Estimated tax payment", &[], Some(date(2024, 11, 30)), "quarterly");
        assert_eq!(next_due_date(&t, at(2024, 12, 1)), Some(date(2025, 2, 28)));
    }

    #[test]
    fn test_yearly_leap_day() {
        let t = task("Leap birthday", &[], Some(date(2024, 2, 29)), "yearly");
        assert_eq!(next_due_date(&t, at(2024, 3, 1)), Some(date(2025, 2, 28)));
    }

    #[test]
    fn test_yearly_birthday_tag() {
        let t = task("Call Alex", &["birthday"], Some(date(2024, 6, 10)), "yearly");
        assert_eq!(next_due_date(&t, at(2024, 6, 12)), Some(date(2025, 6, 10)));
    }

    // ==================
    // Seeds
    // ==================

    #[test]
    fn test_next_occurrence_builds_seed() {
        let clock = FixedClock(at(2024, 1, 20));
        let mut t = task("Pay rent", &["home"], Some(date(2024, 1, 5)), "monthly");
        t.description = Some("Landlord account".to_string());

        let seed = next_occurrence(&t, at(2024, 1, 20), &clock).unwrap();
        assert_eq!(seed.user_id, "u1");
        assert_eq!(seed.user_name, "Sam");
        assert_eq!(seed.title, "Pay rent");
        assert_eq!(seed.description, "Landlord account");
        assert_eq!(seed.entry_date, at(2024, 1, 20));
        assert_eq!(seed.tags, vec!["home", "recurring"]);
        assert_eq!(seed.due_date, Some(date(2024, 2, 5)));
        assert!(!seed.completed);
        assert_eq!(seed.recurrence.as_deref(), Some("monthly"));
        assert_eq!(seed.parent_task_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_recurring_tag_not_duplicated() {
        let clock = FixedClock(at(2024, 1, 10));
        let t = task("Stretch", &["recurring"], None, "daily");
        let seed = next_occurrence(&t, at(2024, 1, 10), &clock).unwrap();
        assert_eq!(seed.tags, vec!["recurring"]);
        assert_eq!(seed.description, "");
    }

    #[test]
    fn test_no_seed_without_recurrence() {
        let clock = FixedClock(at(2024, 1, 10));
        let mut t = task("One-off", &[], None, "daily");
        t.recurrence = None;
        assert!(next_occurrence(&t, at(2024, 1, 10), &clock).is_none());

        t.recurrence = Some("sometimes".to_string());
        assert!(next_occurrence(&t, at(2024, 1, 10), &clock).is_none());
    }
}
