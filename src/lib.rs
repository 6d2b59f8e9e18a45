//! Task Dashboard MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a task
//! tracking dashboard. Tasks live in a single CSV file; every tool call reads
//! it again, so the server holds no task state of its own.
//!
//! # Architecture
//!
//! - **MCP Layer**: `TaskDashboardHandler` - tool surface, one handler per tool in `handlers`
//! - **Domain Layer**: `tasks` (schema normalization), `classifier`, `filter`, `form`, `summary`
//! - **Persistence Layer**: `Storage` - whole-file CSV writes with optional git commits
//!
//! # Example
//!
//! ```no_run
//! use task_dashboard::TaskDashboardHandler;
//!
//! let handler = TaskDashboardHandler::new("tasks.csv", false);
//! // Serve with mcp_attr::server::serve_stdio(handler)...
//! ```

pub mod classifier;
pub mod config;
pub mod evaluation;
pub mod filter;
pub mod form;
pub mod formatting;
mod git_ops;
pub mod handlers;
mod storage;
pub mod summary;
pub mod tasks;
pub mod validation;

use anyhow::{Result, bail};
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;

pub use config::{ConfigOverrides, DashboardConfig};
pub use evaluation::EvaluationPaths;
pub use storage::Storage;
pub use tasks::{Priority, TaskRecord, TaskStatus, TaskTable};

/// MCP Server handler for the task dashboard
pub struct TaskDashboardHandler {
    pub(crate) storage: Storage,
    pub(crate) evaluation: EvaluationPaths,
}

impl TaskDashboardHandler {
    /// Create a handler for the task file at `storage_path`
    ///
    /// # Arguments
    /// * `storage_path` - Path to the CSV task file (created on first write)
    /// * `sync_git` - Commit every write to the git repository holding the file
    pub fn new(storage_path: impl AsRef<Path>, sync_git: bool) -> Self {
        Self {
            storage: Storage::new(storage_path, sync_git),
            evaluation: EvaluationPaths::default(),
        }
    }

    /// Create a handler from resolved configuration
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let Some(data_file) = &config.data_file else {
            bail!("No task file configured. Pass FILE or set data_file in the config file.");
        };

        Ok(Self {
            storage: Storage::new(data_file, config.sync_git)
                .with_atomic_writes(config.atomic_writes),
            evaluation: config.evaluation_paths(),
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

/// Task tracking dashboard over a CSV task file.
///
/// Tasks have a name, description, assignee, priority (low/medium/high),
/// status (pending/in progress/completed), start and due dates, and notes.
///
/// Typical flow:
/// - **import_tasks** an existing CSV, or **add_task** one by one
/// - **predict_priority** from a description, then pass the answer to add_task as suggested_priority
/// - **list_tasks** with filters, **dashboard_summary** for charts
/// - **model_evaluation** to view the priority model's scores
#[mcp_server]
impl McpServer for TaskDashboardHandler {
    /// **List tasks**: filtered view sorted by due date (tasks without a due date first).
    /// **Filters**: each filter is a list of accepted values; omit it to accept every value.
    /// Within a filter any value matches; across filters all must match.
    #[tool]
    async fn list_tasks(
        &self,
        /// Accepted statuses, e.g. ["pending", "in progress"] (optional)
        status: Option<Vec<String>>,
        /// Accepted priorities, e.g. ["high"] (optional)
        priority: Option<Vec<String>>,
        /// Accepted assignees; "" matches unassigned tasks (optional)
        assigned_to: Option<Vec<String>>,
        /// Leave description and notes out of the output (optional)
        exclude_notes: Option<bool>,
    ) -> McpResult<String> {
        self.handle_list_tasks(status, priority, assigned_to, exclude_notes)
            .await
    }

    /// **Filter options**: values currently present for status, priority and assigned_to.
    #[tool]
    async fn filter_options(&self) -> McpResult<String> {
        self.handle_filter_options().await
    }

    /// **Predict priority**: suggest low/medium/high from a task description using keyword rules.
    /// **Next**: pass the result to add_task as suggested_priority.
    #[tool]
    async fn predict_priority(
        &self,
        /// Free-text task description
        text: String,
    ) -> McpResult<String> {
        self.handle_predict_priority(text).await
    }

    /// **Add task**: create a task and save it immediately. task_name is required.
    /// **Defaults**: priority=suggested_priority or medium, status=pending, start_date=today.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn add_task(
        &self,
        /// Task name (required, non-empty)
        task_name: String,
        /// Description (optional)
        description: Option<String>,
        /// Assignee (optional)
        assigned_to: Option<String>,
        /// Priority: low/medium/high, overrides suggested_priority (optional)
        priority: Option<String>,
        /// Result of the last predict_priority call (optional)
        suggested_priority: Option<String>,
        /// Status: pending/in progress/completed (optional)
        status: Option<String>,
        /// Start date YYYY-MM-DD, ""=none (optional)
        start_date: Option<String>,
        /// Due date YYYY-MM-DD (optional)
        due_date: Option<String>,
        /// Notes (optional)
        notes: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(
            task_name,
            description,
            assigned_to,
            priority,
            suggested_priority,
            status,
            start_date,
            due_date,
            notes,
        )
        .await
    }

    /// **Import tasks**: load a CSV file with any column naming ("Task Name", "Due Date", ...).
    /// **Mode**: "replace" (default) overwrites the stored tasks, "append" adds to them.
    #[tool]
    async fn import_tasks(
        &self,
        /// Path of the CSV file to import
        path: String,
        /// replace/append (optional)
        mode: Option<String>,
    ) -> McpResult<String> {
        self.handle_import_tasks(path, mode).await
    }

    /// **Dashboard**: dataset info, priority and status distributions, task duration
    /// histogram, top 10 assignees and a preview of the first rows.
    #[tool]
    async fn dashboard_summary(&self) -> McpResult<String> {
        self.handle_dashboard_summary().await
    }

    /// **Model evaluation**: accuracy/precision/recall/F1, confusion matrix and best
    /// hyperparameters. Needs all three files; paths default to the configured ones.
    #[tool]
    async fn model_evaluation(
        &self,
        /// Classification report JSON (metrics.json) (optional)
        metrics_path: Option<String>,
        /// Confusion matrix CSV (confusion_matrix.csv) (optional)
        confusion_matrix_path: Option<String>,
        /// Best hyperparameters JSON (best_params.json) (optional)
        best_params_path: Option<String>,
    ) -> McpResult<String> {
        self.handle_model_evaluation(metrics_path, confusion_matrix_path, best_params_path)
            .await
    }
}
