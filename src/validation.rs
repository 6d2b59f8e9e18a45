//! Validation helper functions for the dashboard tools
//!
//! Turns raw tool arguments into typed values, with readable errors for the
//! client when an argument is out of range.

use crate::tasks::{Priority, TaskStatus};
use chrono::NaiveDate;
use mcp_attr::Result as McpResult;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

fn invalid_params(message: impl Display) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message.to_string(), true)
}

/// Parse a priority argument (low/medium/high)
pub fn parse_priority(value: &str) -> McpResult<Priority> {
    value.parse::<Priority>().map_err(invalid_params)
}

/// Parse a status argument (pending/in progress/completed)
pub fn parse_status(value: &str) -> McpResult<TaskStatus> {
    value.parse::<TaskStatus>().map_err(invalid_params)
}

/// Parse an entry-form date in YYYY-MM-DD format; an empty string means no date
pub fn parse_date_input(value: &str) -> McpResult<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            invalid_params(format!(
                "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
                value
            ))
        })
}

/// Filter argument to accepted set; `None` keeps the default (all values)
pub fn selection_set(values: Option<Vec<String>>) -> Option<BTreeSet<String>> {
    values.map(|v| v.into_iter().collect())
}

/// How an imported file is combined with the stored tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportMode {
    #[default]
    Replace,
    Append,
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(ImportMode::Replace),
            "append" => Ok(ImportMode::Append),
            _ => Err(format!(
                "Invalid import mode '{}'. Valid modes: replace, append",
                s
            )),
        }
    }
}

/// Parse an import mode argument, defaulting to replace
pub fn parse_import_mode(value: Option<&str>) -> McpResult<ImportMode> {
    match value {
        None => Ok(ImportMode::default()),
        Some(v) => v.parse::<ImportMode>().map_err(invalid_params),
    }
}
