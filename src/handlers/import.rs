//! CSV import handler

use crate::TaskDashboardHandler;
use crate::tasks::{CANONICAL_FIELDS, RawTable, canonical_column_name, normalize};
use crate::validation::{self, ImportMode};
use mcp_attr::{Result as McpResult, bail_public};
use std::fs::File;
use tracing::info;

impl TaskDashboardHandler {
    /// **Import**: reads an uploaded CSV file, normalizes it and stores it.
    ///
    /// `replace` (default) swaps the stored tasks for the file's rows, `append`
    /// adds them after the existing ones. Rows are taken as they are: ids and
    /// enum values are not checked.
    pub async fn handle_import_tasks(
        &self,
        path: String,
        mode: Option<String>,
    ) -> McpResult<String> {
        let mode = validation::parse_import_mode(mode.as_deref())?;

        let raw = match File::open(&path)
            .map_err(anyhow::Error::from)
            .and_then(RawTable::from_csv)
        {
            Ok(r) => r,
            Err(e) => bail_public!(_, "Failed to read '{}': {:#}", path, e),
        };

        let ignored: Vec<&str> = raw
            .columns
            .iter()
            .filter(|c| !CANONICAL_FIELDS.contains(&canonical_column_name(c).as_str()))
            .map(String::as_str)
            .collect();
        let table = normalize(&raw);
        let count = table.len();

        let stored = match mode {
            ImportMode::Replace => self.storage.replace_with(&table).map(|_| count),
            ImportMode::Append => self.storage.extend(table),
        };
        if let Err(e) = stored {
            bail_public!(_, "Failed to save: {:#}", e);
        }
        info!(rows = count, ?mode, path = %path, "imported tasks");

        let mut result = format!(
            "Imported {} task(s) from '{}' (mode: {})",
            count,
            path,
            match mode {
                ImportMode::Replace => "replace",
                ImportMode::Append => "append",
            }
        );
        if !ignored.is_empty() {
            result.push_str(&format!("\nIgnored columns: {}", ignored.join(", ")));
        }
        Ok(result)
    }
}
