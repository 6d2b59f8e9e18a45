use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical column order of the task table
pub const CANONICAL_FIELDS: [&str; 9] = [
    "id",
    "task_name",
    "description",
    "assigned_to",
    "priority",
    "status",
    "start_date",
    "due_date",
    "notes",
];

/// Date format used when writing dates back to the task file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Errors raised while entering a new task
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task name is required. Please enter a task name before adding the task.")]
    EmptyTaskName,

    #[error("Invalid priority '{0}'. Valid priorities: low, medium, high")]
    InvalidPriority(String),

    #[error("Invalid status '{0}'. Valid statuses: pending, in progress, completed")]
    InvalidStatus(String),
}

/// Task priority as chosen at entry time
///
/// Uses lowercase naming to match the values written to the task file.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    low,
    #[default]
    medium,
    high,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::low => "low",
            Priority::medium => "medium",
            Priority::high => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::low),
            "medium" => Ok(Priority::medium),
            "high" => Ok(Priority::high),
            _ => Err(TaskError::InvalidPriority(s.to_string())),
        }
    }
}

/// Task status as chosen at entry time
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    pending,
    #[serde(rename = "in progress")]
    in_progress,
    completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::pending => "pending",
            TaskStatus::in_progress => "in progress",
            TaskStatus::completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "in_progress" is accepted as a convenience for clients that avoid spaces
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::pending),
            "in progress" | "in_progress" => Ok(TaskStatus::in_progress),
            "completed" => Ok(TaskStatus::completed),
            _ => Err(TaskError::InvalidStatus(s.to_string())),
        }
    }
}

/// A single row of the canonical task table
///
/// `priority` and `status` are kept as plain strings: values already on disk
/// are not checked against [`Priority`] or [`TaskStatus`], only new entries are.
/// An empty string (or `None` for dates) is the "missing" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRecord {
    /// Unique identifier (UUID v4 for tasks created here)
    pub id: String,
    /// Short task title, never empty for tasks created here
    pub task_name: String,
    pub description: String,
    /// Person the task is assigned to, used for grouping
    pub assigned_to: String,
    pub priority: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    /// Sort key of the filtered view
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

impl TaskRecord {
    /// Value of the canonical column at `index`, as written to the task file
    ///
    /// Dates are rendered as `YYYY-MM-DD`, missing values as an empty string.
    /// Out-of-range indexes yield an empty string.
    pub fn value(&self, index: usize) -> String {
        match index {
            0 => self.id.clone(),
            1 => self.task_name.clone(),
            2 => self.description.clone(),
            3 => self.assigned_to.clone(),
            4 => self.priority.clone(),
            5 => self.status.clone(),
            6 => format_date(self.start_date),
            7 => format_date(self.due_date),
            8 => self.notes.clone(),
            _ => String::new(),
        }
    }

    /// All nine canonical values in column order
    pub fn values(&self) -> Vec<String> {
        (0..CANONICAL_FIELDS.len()).map(|i| self.value(i)).collect()
    }
}

/// Render an optional date the way it is stored (`""` when absent)
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::high);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::low);
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(TaskError::InvalidPriority("urgent".to_string()))
        );
    }

    #[test]
    fn test_status_accepts_in_progress_spellings() {
        assert_eq!(
            "in progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::in_progress
        );
        assert_eq!(
            "in_progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::in_progress
        );
        assert_eq!(TaskStatus::in_progress.to_string(), "in progress");
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_record_values_follow_canonical_order() {
        let record = TaskRecord {
            id: "t1".to_string(),
            task_name: "Write report".to_string(),
            priority: "high".to_string(),
            status: "pending".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 4, 3),
            ..Default::default()
        };

        let values = record.values();
        assert_eq!(values.len(), CANONICAL_FIELDS.len());
        assert_eq!(values[0], "t1");
        assert_eq!(values[4], "high");
        assert_eq!(values[6], "");
        assert_eq!(values[7], "2024-04-03");
        assert_eq!(record.value(CANONICAL_FIELDS.len()), "");
    }
}
