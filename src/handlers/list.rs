//! List and filter-options handlers

use crate::TaskDashboardHandler;
use crate::filter::{self, Selections};
use crate::formatting;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskDashboardHandler {
    /// Loads the task file, applies the selections and formats the result.
    pub async fn handle_list_tasks(
        &self,
        status: Option<Vec<String>>,
        priority: Option<Vec<String>>,
        assigned_to: Option<Vec<String>>,
        exclude_notes: Option<bool>,
    ) -> McpResult<String> {
        let table = match self.storage.load() {
            Ok(t) => t,
            Err(e) => bail_public!(_, "Failed to load tasks: {:#}", e),
        };

        let selections = Selections {
            status: validation::selection_set(status),
            priority: validation::selection_set(priority),
            assigned_to: validation::selection_set(assigned_to),
        };
        let filtered = filter::filter(&table, &selections);

        Ok(formatting::format_tasks(
            &filtered,
            exclude_notes.unwrap_or(false),
        ))
    }

    pub async fn handle_filter_options(&self) -> McpResult<String> {
        match self.storage.load() {
            Ok(table) => Ok(formatting::format_filter_options(&table)),
            Err(e) => bail_public!(_, "Failed to load tasks: {:#}", e),
        }
    }
}
