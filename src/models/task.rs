use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::assignment::Assignment;
use super::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Approved,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Approved => "approved",
        }
    }

    /// Accepts the stored spelling plus the looser forms older records use
    /// ("In Progress", "in-progress").
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Approved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A task as the rest of the program sees it. The stored form lives in
/// [`TaskRecord`]; conversion happens once, on load and on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
    pub task_type: Option<String>,
    pub due_date: Option<String>,
    pub visible_from_date: Option<String>,
    pub visible_to_date: Option<String>,
    pub frequency: Option<String>,
    pub comment: Option<String>,
    pub recurring_task_id: Option<u64>,
    pub assignment: Assignment,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Stored status text that is not one of the known statuses. `status`
    /// reads as pending meanwhile; the text is saved back until
    /// [`Task::set_status`] replaces it.
    pub unknown_status: Option<String>,
    /// Stored priority text that is not low, medium or high.
    pub unknown_priority: Option<String>,
    /// Fields this version does not know about, written back untouched.
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            priority: None,
            task_type: None,
            due_date: None,
            visible_from_date: None,
            visible_to_date: None,
            frequency: None,
            comment: None,
            recurring_task_id: None,
            assignment: Assignment::Unassigned,
            created_at: None,
            updated_at: None,
            unknown_status: None,
            unknown_priority: None,
            extra: Map::new(),
        }
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.unknown_status = None;
    }

    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority;
        self.unknown_priority = None;
    }

    /// The free-text recurrence descriptor. Older records keep it in
    /// `comment`.
    pub fn frequency_tag(&self) -> Option<&str> {
        self.frequency.as_deref().or(self.comment.as_deref())
    }
}

/// Stored shape of a task: camelCase field names, loosely typed values and
/// both the current (`assignTo`) and legacy (`assignedTo`) assignment
/// fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub visible_from_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub visible_to_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id", skip_serializing_if = "Option::is_none")]
    pub recurring_task_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub assign_to: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<TaskRecord> for Task {
    fn from(r: TaskRecord) -> Self {
        let mut unknown_status = None;
        let status = match r.status {
            None => TaskStatus::Pending,
            Some(raw) => TaskStatus::from_str(&raw).unwrap_or_else(|| {
                tracing::warn!(task_id = r.id, status = %raw, "unknown task status, reading as pending");
                unknown_status = Some(raw);
                TaskStatus::Pending
            }),
        };
        let mut unknown_priority = None;
        let priority = match r.priority {
            None => None,
            Some(raw) => {
                let parsed = Priority::from_str(&raw);
                if parsed.is_none() && !raw.trim().is_empty() {
                    tracing::warn!(task_id = r.id, priority = %raw, "unknown task priority, ignoring");
                    unknown_priority = Some(raw);
                }
                parsed
            }
        };
        let assignment = Assignment::resolve(r.assign_to.as_deref(), r.assigned_to.as_deref());

        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            status,
            priority,
            task_type: r.task_type,
            due_date: r.due_date,
            visible_from_date: r.visible_from_date,
            visible_to_date: r.visible_to_date,
            frequency: r.frequency,
            comment: r.comment,
            recurring_task_id: r.recurring_task_id,
            assignment,
            created_at: r.created_at,
            updated_at: r.updated_at,
            unknown_status,
            unknown_priority,
            extra: r.extra,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            status: t
                .unknown_status
                .or_else(|| Some(t.status.as_str().to_string())),
            priority: t
                .priority
                .map(|p| p.as_str().to_string())
                .or(t.unknown_priority),
            task_type: t.task_type,
            due_date: t.due_date,
            visible_from_date: t.visible_from_date,
            visible_to_date: t.visible_to_date,
            frequency: t.frequency,
            comment: t.comment,
            recurring_task_id: t.recurring_task_id,
            assign_to: t.assignment.tag(),
            assigned_to: None,
            created_at: t.created_at,
            updated_at: t.updated_at,
            extra: t.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StaffId;
    use serde_json::json;

    #[test]
    fn test_reads_camel_case_record() {
        let task: Task = serde_json::from_value(json!({
            "id": 3,
            "title": "Flush reservoir",
            "status": "in_progress",
            "priority": "High",
            "type": "maintenance",
            "dueDate": "2025-08-05",
            "visibleFromDate": "2025-08-01",
            "recurringTaskId": 9,
            "assignTo": "role_Grower"
        }))
        .unwrap();
        assert_eq!(task.id, 3);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.task_type.as_deref(), Some("maintenance"));
        assert_eq!(task.visible_from_date.as_deref(), Some("2025-08-01"));
        assert_eq!(task.recurring_task_id, Some(9));
        assert_eq!(task.assignment, Assignment::Role("Grower".into()));
    }

    #[test]
    fn test_legacy_assignment_field_is_folded() {
        let task: Task =
            serde_json::from_value(json!({"id": 1, "title": "x", "assignedTo": "user_4"})).unwrap();
        assert_eq!(task.assignment, Assignment::User(StaffId::from(4)));

        let saved = serde_json::to_value(&task).unwrap();
        assert_eq!(saved["assignTo"], "user_4");
        assert!(saved.get("assignedTo").is_none());
    }

    #[test]
    fn test_current_field_beats_legacy() {
        let task: Task = serde_json::from_value(
            json!({"id": 1, "title": "x", "assignTo": "all_staff", "assignedTo": "user_4"}),
        )
        .unwrap();
        assert_eq!(task.assignment, Assignment::AllStaff);
    }

    #[test]
    fn test_malformed_fields_do_not_fail_the_record() {
        let task: Task = serde_json::from_value(json!({
            "id": "12",
            "title": "Check pH",
            "status": "archived",
            "priority": 5,
            "dueDate": {"bad": true},
            "photos": ["a.jpg"]
        }))
        .unwrap();
        assert_eq!(task.id, 12);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.extra["photos"], json!(["a.jpg"]));
    }

    #[test]
    fn test_unknown_status_and_priority_are_written_back() {
        let mut task: Task = serde_json::from_value(json!({
            "id": 1,
            "title": "Old crop",
            "status": "archived",
            "priority": "urgent"
        }))
        .unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, None);

        let saved = serde_json::to_value(&task).unwrap();
        assert_eq!(saved["status"], "archived");
        assert_eq!(saved["priority"], "urgent");

        task.set_status(TaskStatus::Pending);
        task.set_priority(Some(Priority::Low));
        let saved = serde_json::to_value(&task).unwrap();
        assert_eq!(saved["status"], "pending");
        assert_eq!(saved["priority"], "low");
    }

    #[test]
    fn test_frequency_falls_back_to_comment() {
        let mut task = Task::new(1, "x");
        task.comment = Some("Bi-Weekly".into());
        assert_eq!(task.frequency_tag(), Some("Bi-Weekly"));
        task.frequency = Some("weekly".into());
        assert_eq!(task.frequency_tag(), Some("weekly"));
    }
}
