//! Dashboard summary handler

use crate::TaskDashboardHandler;
use crate::formatting;
use crate::summary::DashboardSummary;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskDashboardHandler {
    pub async fn handle_dashboard_summary(&self) -> McpResult<String> {
        let table = match self.storage.load() {
            Ok(t) => t,
            Err(e) => bail_public!(_, "Failed to load tasks: {:#}", e),
        };
        Ok(formatting::format_summary(&DashboardSummary::of(&table)))
    }
}
