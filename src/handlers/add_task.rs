//! Add-task handler

use crate::TaskDashboardHandler;
use crate::form::TaskForm;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::warn;

impl TaskDashboardHandler {
    /// **Add task**: builds a record from the entry form and appends it to the task file.
    ///
    /// The form starts from `suggested_priority` (the last `predict_priority` answer,
    /// passed back by the client) and then takes any explicitly given values.
    /// An empty task name is refused and nothing is written.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_add_task(
        &self,
        task_name: String,
        description: Option<String>,
        assigned_to: Option<String>,
        priority: Option<String>,
        suggested_priority: Option<String>,
        status: Option<String>,
        start_date: Option<String>,
        due_date: Option<String>,
        notes: Option<String>,
    ) -> McpResult<String> {
        let suggestion = suggested_priority
            .as_deref()
            .map(validation::parse_priority)
            .transpose()?;

        let mut form = TaskForm::with_suggestion(suggestion);
        form.task_name = task_name;
        form.description = description.unwrap_or_default();
        form.assigned_to = assigned_to.unwrap_or_default();
        form.notes = notes.unwrap_or_default();
        if let Some(ref p) = priority {
            form.priority = validation::parse_priority(p)?;
        }
        if let Some(ref s) = status {
            form.status = validation::parse_status(s)?;
        }
        if let Some(ref d) = start_date {
            form.start_date = validation::parse_date_input(d)?;
        }
        if let Some(ref d) = due_date {
            form.due_date = validation::parse_date_input(d)?;
        }

        let record = match form.into_record() {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "task rejected");
                bail_public!(_, "{}", e);
            }
        };

        let id = record.id.clone();
        let summary = format!(
            "Task created with ID: {} (priority: {}, status: {})",
            id, record.priority, record.status
        );
        if let Err(e) = self.storage.append(record) {
            bail_public!(_, "Failed to save: {:#}", e);
        }

        Ok(summary)
    }
}
