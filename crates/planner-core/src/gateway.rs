use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::task::{Priority, Task};

// ---------------------------------------------------------------------------
// NewTask / TaskPatch
// ---------------------------------------------------------------------------

/// A task record before the gateway has assigned it an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub assignee: String,
    pub created_at: DateTime<Utc>,
    pub time_slot: String,
    pub date: NaiveDate,
}

impl NewTask {
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title,
            completed: self.completed,
            priority: self.priority,
            assignee: self.assignee,
            created_at: self.created_at,
            time_slot: self.time_slot,
            date: self.date,
        }
    }
}

/// Partial update sent to the gateway; only the set fields change.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl TaskPatch {
    pub fn completed(value: bool) -> Self {
        TaskPatch {
            completed: Some(value),
            ..Default::default()
        }
    }

    pub fn title(value: impl Into<String>) -> Self {
        TaskPatch {
            title: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn assignee(value: impl Into<String>) -> Self {
        TaskPatch {
            assignee: Some(value.into()),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// TaskGateway
// ---------------------------------------------------------------------------

/// Port to the persistent task store.
///
/// Implementations must bound their waits; nothing here retries. Deleting an
/// id that is already gone succeeds, so a delete may be repeated safely after
/// a dropped response. Updates are not blindly repeatable — a completion
/// toggle flips state — which is why retry stays out of this layer.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Every task whose `date` matches, in creation order.
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<Task>>;

    /// Persist a new task; returns the assigned id.
    async fn create(&self, new: NewTask) -> Result<String>;

    /// Apply a partial update to an existing task.
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<()>;

    /// Remove a task. Succeeds even if the id no longer exists.
    async fn delete(&self, id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_serializes_only_set_fields() {
        let json = serde_json::to_value(TaskPatch::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));

        let json = serde_json::to_value(TaskPatch::title("New title")).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "New title" }));

        let json = serde_json::to_value(TaskPatch::assignee("Kavya")).unwrap();
        assert_eq!(json, serde_json::json!({ "assignee": "Kavya" }));
    }

    #[test]
    fn new_task_keeps_fields_through_id_assignment() {
        let new = NewTask {
            title: "Standup".into(),
            completed: false,
            priority: Priority::Medium,
            assignee: "Unassigned".into(),
            created_at: Utc::now(),
            time_slot: "9:00 AM - 10:00 AM".into(),
            date: "2024-06-01".parse().unwrap(),
        };
        let task = new.clone().into_task("abc".into());
        assert_eq!(task.id, "abc");
        assert_eq!(task.title, new.title);
        assert_eq!(task.time_slot, new.time_slot);
        assert_eq!(task.date, new.date);
    }
}
