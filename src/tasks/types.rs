use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The tag every spawned occurrence of a recurring task carries.
pub const RECURRING_TAG: &str = "recurring";

/// A task as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entry_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub parent_task_id: Option<String>,
}

impl TaskRecord {
    /// Check if the task carries exactly `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Append `tag` unless the list already holds exactly that tag.
pub fn push_tag(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

/// Everything needed to create a task; the store assigns the id.
///
/// Produced by quick-add and by the recurrence projector, which sets
/// `parent_task_id` to the task that was just completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSeed {
    pub user_id: String,
    pub user_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub entry_date: NaiveDateTime,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default)]
    pub parent_task_id: Option<String>,
}

impl TaskSeed {
    /// Turn the seed into a record with the id the store assigned.
    #[must_use]
    pub fn into_record(self, id: String) -> TaskRecord {
        TaskRecord {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            title: self.title,
            description: (!self.description.is_empty()).then_some(self.description),
            entry_date: Some(self.entry_date),
            tags: self.tags,
            due_date: self.due_date,
            recurrence: self.recurrence,
            completed: self.completed,
            completed_at: None,
            parent_task_id: self.parent_task_id,
        }
    }
}
