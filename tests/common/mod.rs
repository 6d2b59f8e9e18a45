//! Common test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use task_dashboard::TaskDashboardHandler;
use tempfile::TempDir;

/// Create a test handler whose task file lives in a fresh temporary directory
pub fn get_test_handler() -> (TaskDashboardHandler, TempDir) {
    let dir = TempDir::new().unwrap();
    let handler = TaskDashboardHandler::new(dir.path().join("tasks.csv"), false);
    (handler, dir)
}

/// Write `content` to `name` inside `dir` and return the path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Extract task ID from add_task response message
/// Response format: "Task created with ID: <id> (priority: ..., status: ...)"
pub fn extract_id_from_response(response: &str) -> String {
    if let Some(start) = response.find("ID: ") {
        let id_part = &response[start + 4..];
        if let Some(end) = id_part.find(" (") {
            return id_part[..end].trim().to_string();
        }
    }
    String::new()
}

/// Legacy-style export with human-readable headers
pub const LEGACY_CSV: &str = "\
Task ID, Task Name ,Description,Assigned To,Priority,Status,Start Date,Due Date,Notes,Task Duration Days
T1,Prepare slides,Quarterly review,Ana,medium,pending,01/03/2024,05/03/2024,,4
T2,Submit taxes,,Bo,high,in progress,2024-02-01,not a date,Call accountant,
T3,Water plants,,,low,completed,,,,
";
