//! New-task entry form
//!
//! The form starts from defaults and the caller's most recent priority
//! suggestion, which is handed in explicitly rather than kept in shared state.

use crate::tasks::{Priority, TaskError, TaskRecord, TaskStatus, local_date_today};
use chrono::NaiveDate;
use uuid::Uuid;

/// Values of the "add task" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub task_name: String,
    pub description: String,
    pub assigned_to: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

impl TaskForm {
    /// Form defaults, with the priority preset to `suggested` when given
    pub fn with_suggestion(suggested: Option<Priority>) -> Self {
        Self {
            task_name: String::new(),
            description: String::new(),
            assigned_to: String::new(),
            priority: suggested.unwrap_or_default(),
            status: TaskStatus::default(),
            start_date: Some(local_date_today()),
            due_date: None,
            notes: String::new(),
        }
    }

    /// Validate the form and turn it into a record with a fresh id
    pub fn into_record(self) -> Result<TaskRecord, TaskError> {
        if self.task_name.trim().is_empty() {
            return Err(TaskError::EmptyTaskName);
        }

        Ok(TaskRecord {
            id: Uuid::new_v4().to_string(),
            task_name: self.task_name,
            description: self.description,
            assigned_to: self.assigned_to,
            priority: self.priority.to_string(),
            status: self.status.to_string(),
            start_date: self.start_date,
            due_date: self.due_date,
            notes: self.notes,
        })
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::with_suggestion(None)
    }
}
