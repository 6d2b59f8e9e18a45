//! Priority prediction handler

use crate::TaskDashboardHandler;
use crate::classifier;
use mcp_attr::Result as McpResult;

impl TaskDashboardHandler {
    /// Suggests a priority for a task description.
    ///
    /// Nothing is remembered between calls: the client passes the result on
    /// to `add_task` as `suggested_priority`.
    pub async fn handle_predict_priority(&self, text: String) -> McpResult<String> {
        let priority = classifier::classify(&text);
        Ok(format!(
            "Predicted priority: {}\nPass suggested_priority=\"{}\" to add_task to preset it.",
            priority, priority
        ))
    }
}
