use super::tagged::{Rich, Tagged, TaggedError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A stored task.
///
/// `completed_at` is the deadline, not the moment the task was finished;
/// `completed` is toggled independently of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl Task {
    /// Whether the deadline has passed at `now`, regardless of completion.
    ///
    /// Tasks without a deadline are never overdue.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.completed_at.is_some_and(|deadline| now > deadline)
    }

    /// Overdue and still not completed.
    pub fn is_late_at(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.is_overdue_at(now)
    }

    pub fn is_late(&self) -> bool {
        self.is_late_at(Utc::now())
    }
}

impl Tagged for Task {
    fn to_rich(&self) -> Rich {
        Rich::Object(BTreeMap::from([
            ("id".to_string(), self.id.to_rich()),
            ("title".to_string(), self.title.to_rich()),
            ("description".to_string(), self.description.to_rich()),
            ("created_at".to_string(), self.created_at.to_rich()),
            ("completed_at".to_string(), self.completed_at.to_rich()),
            ("completed".to_string(), self.completed.to_rich()),
        ]))
    }

    fn from_rich(value: Rich) -> Result<Self, TaggedError> {
        let mut fields = value.into_object()?;
        Ok(Task {
            id: i64::from_rich(Rich::take_field(&mut fields, "id")?)?,
            title: String::from_rich(Rich::take_field(&mut fields, "title")?)?,
            description: String::from_rich(Rich::take_field(&mut fields, "description")?)?,
            created_at: DateTime::from_rich(Rich::take_field(&mut fields, "created_at")?)?,
            completed_at: Option::from_rich(fields.remove("completed_at").unwrap_or(Rich::Null))?,
            completed: bool::from_rich(Rich::take_field(&mut fields, "completed")?)?,
        })
    }
}

/// Fields for a task that has not been stored yet.
///
/// Also serves as the add-form draft. Omitted fields take the draft defaults:
/// empty description, `created_at` = now, no deadline, not completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

impl NewTask {
    pub fn new(title: &str, description: &str, completed_at: Option<DateTime<Utc>>) -> Self {
        NewTask {
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            completed_at,
            completed: false,
        }
    }

    /// An empty draft stamped with the current time.
    pub fn blank() -> Self {
        Self::new("", "", None)
    }
}

impl Default for NewTask {
    fn default() -> Self {
        Self::blank()
    }
}

/// A partial update addressed by id.
///
/// `None` leaves a field untouched. `completed_at` is doubly optional so a
/// client can clear the deadline with an explicit `null`. `created_at` is not
/// part of the patch and is ignored if a client sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn new(id: i64) -> Self {
        TaskPatch { id, ..Default::default() }
    }

    /// Only the completion flag, as sent by the toggle.
    pub fn completed(id: i64, completed: bool) -> Self {
        TaskPatch {
            completed: Some(completed),
            ..Self::new(id)
        }
    }

    /// Every editable field of `task`, as sent when saving an edit.
    pub fn from_task(task: &Task) -> Self {
        TaskPatch {
            id: task.id,
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            completed_at: Some(task.completed_at),
            completed: Some(task.completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed_at.is_none() && self.completed.is_none()
    }

    /// Applies the patch to a local copy.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(completed_at) = self.completed_at {
            task.completed_at = completed_at;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

// A present field, even `null`, becomes `Some(..)`; absence is handled by `default`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Browser drafts send `"description": null` for an untouched field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Body of the delete request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskId {
    pub id: i64,
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    All,
    ByDeadline,
    DueBefore(DateTime<Utc>),
}
