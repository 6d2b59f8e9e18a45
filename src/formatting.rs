//! Formatting helper functions for the dashboard tools
//!
//! Every tool answers with plain text: task lists, text bar charts and the
//! evaluation section.

use crate::evaluation::ModelEvaluation;
use crate::filter::{FilterField, distinct_values};
use crate::summary::{DashboardSummary, HistogramBin};
use crate::tasks::{TaskRecord, TaskTable, format_date};
use std::fmt::Write;

/// Width of the longest bar in text charts
const BAR_WIDTH: usize = 30;

/// Shading used for the confusion matrix heat map, light to dark
const HEAT_SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Format tasks into a display string
///
/// # Arguments
/// * `table` - Tasks to list, already filtered and sorted
/// * `exclude_notes` - Whether to leave description and notes out
pub fn format_tasks(table: &TaskTable, exclude_notes: bool) -> String {
    if table.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", table.len());
    for record in &table.records {
        format_task(&mut result, record, exclude_notes);
    }
    result
}

fn format_task(out: &mut String, record: &TaskRecord, exclude_notes: bool) {
    let _ = writeln!(
        out,
        "- [{}] {} (priority: {}, status: {})",
        record.id,
        record.task_name,
        or_dash(&record.priority),
        or_dash(&record.status)
    );
    if !record.assigned_to.is_empty() {
        let _ = writeln!(out, "  Assigned to: {}", record.assigned_to);
    }
    if record.start_date.is_some() {
        let _ = writeln!(out, "  Start date: {}", format_date(record.start_date));
    }
    if record.due_date.is_some() {
        let _ = writeln!(out, "  Due date: {}", format_date(record.due_date));
    }
    if !exclude_notes {
        if !record.description.is_empty() {
            let _ = writeln!(out, "  Description: {}", record.description);
        }
        if !record.notes.is_empty() {
            let _ = writeln!(out, "  Notes: {}", record.notes);
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// List the values each filter accepts by default
pub fn format_filter_options(table: &TaskTable) -> String {
    let mut result = String::from("Filter options (default: all selected):\n");
    for field in FilterField::ALL {
        let values: Vec<String> = distinct_values(table, field)
            .into_iter()
            .map(|v| if v.is_empty() { "\"\"".to_string() } else { v })
            .collect();
        let _ = writeln!(result, "- {}: {}", field.name(), values.join(", "));
    }
    result
}

/// Horizontal text bar chart of labelled counts
pub fn format_bar_chart(title: &str, counts: &[(String, usize)]) -> String {
    let mut result = format!("{}\n", title);
    if counts.is_empty() {
        result.push_str("  (no data)\n");
        return result;
    }

    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    let label_width = counts.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    for (label, count) in counts {
        let _ = writeln!(
            result,
            "  {:<width$} | {} {}",
            label,
            bar(*count, max),
            count,
            width = label_width
        );
    }
    result
}

fn format_histogram(bins: &[HistogramBin]) -> String {
    let mut result = String::from("Task Duration (Days)\n");
    if bins.is_empty() {
        result.push_str("  (no tasks with both start and due date)\n");
        return result;
    }

    let max = bins.iter().map(|b| b.count).max().unwrap_or(1).max(1);
    for (i, bin) in bins.iter().enumerate() {
        let close = if i + 1 == bins.len() { ']' } else { ')' };
        let _ = writeln!(
            result,
            "  [{:>7.1}, {:>7.1}{} | {} {}",
            bin.start,
            bin.end,
            close,
            bar(bin.count, max),
            bin.count
        );
    }
    result
}

fn bar(count: usize, max: usize) -> String {
    "#".repeat(count * BAR_WIDTH / max)
}

/// Render the full dashboard summary
pub fn format_summary(summary: &DashboardSummary) -> String {
    let mut result = String::from("Task Management Dashboard\n\n");

    let info = &summary.info;
    let _ = writeln!(result, "Dataset Info");
    let _ = writeln!(
        result,
        "  Shape of Dataset: ({}, {})",
        info.rows, info.columns
    );
    let _ = writeln!(result, "  Missing Values:");
    for (column, count) in &info.missing {
        let _ = writeln!(result, "    {}: {}", column, count);
    }
    result.push('\n');

    result.push_str("Dataset Preview\n");
    if summary.preview.is_empty() {
        result.push_str("  (empty)\n");
    } else {
        for record in &summary.preview {
            let _ = writeln!(result, "  {}", record.values().join(" | "));
        }
    }
    result.push('\n');

    result.push_str(&format_bar_chart(
        "Task Priority Distribution",
        &summary.priority_counts,
    ));
    result.push('\n');
    result.push_str(&format_bar_chart(
        "Task Status Distribution",
        &summary.status_counts,
    ));
    result.push('\n');
    result.push_str(&format_histogram(&summary.duration_histogram));
    result.push('\n');
    result.push_str(&format_bar_chart(
        "Top 10 Users by Task Assignment",
        &summary.top_assignees,
    ));
    result
}

/// Score as a percentage with two decimals (0.8765 → "87.65%")
pub fn format_percentage(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Render the model evaluation section
pub fn format_evaluation(evaluation: &ModelEvaluation) -> String {
    let metrics = &evaluation.metrics;
    let mut result = String::from("Logistic Regression Model Evaluation\n\n");
    let _ = writeln!(result, "  Accuracy:  {}", format_percentage(metrics.accuracy));
    let _ = writeln!(result, "  Precision: {}", format_percentage(metrics.precision));
    let _ = writeln!(result, "  Recall:    {}", format_percentage(metrics.recall));
    let _ = writeln!(result, "  F1 Score:  {}", format_percentage(metrics.f1));
    result.push('\n');

    result.push_str(&format_heat_map(&evaluation.confusion_matrix));
    result.push('\n');

    result.push_str("Best Hyperparameters from GridSearchCV\n");
    let params = serde_json::to_string_pretty(&evaluation.best_params)
        .unwrap_or_else(|_| "{}".to_string());
    result.push_str(&params);
    result.push('\n');
    result
}

/// Confusion matrix as an annotated text heat map (rows actual, columns predicted)
pub fn format_heat_map(matrix: &[Vec<i64>]) -> String {
    let mut result = String::from("Confusion Matrix (rows: Actual, columns: Predicted)\n");
    if matrix.is_empty() {
        result.push_str("  (empty)\n");
        return result;
    }

    let max = matrix.iter().flatten().copied().max().unwrap_or(0).max(1);
    let width = matrix
        .iter()
        .flatten()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);
    let columns = matrix.iter().map(Vec::len).max().unwrap_or(0);

    let header: Vec<String> = (0..columns)
        .map(|c| format!("{:>width$}", c, width = width + 1))
        .collect();
    let _ = writeln!(result, "      {}", header.join(" "));
    for (r, row) in matrix.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|&v| format!("{}{:>width$}", shade(v, max), v, width = width))
            .collect();
        let _ = writeln!(result, "  {:>3} {}", r, cells.join(" "));
    }
    result
}

fn shade(value: i64, max: i64) -> char {
    if value <= 0 {
        return HEAT_SHADES[0];
    }
    let last = HEAT_SHADES.len() - 1;
    let index = (value as f64 / max as f64 * last as f64).ceil() as usize;
    HEAT_SHADES[index.min(last)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::ModelMetrics;
    use chrono::NaiveDate;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.8765), "87.65%");
        assert_eq!(format_percentage(1.0), "100.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_format_tasks_empty() {
        assert_eq!(format_tasks(&TaskTable::new(), false), "No tasks found");
    }

    #[test]
    fn test_format_tasks_exclude_notes() {
        let table = TaskTable::from_records(vec![TaskRecord {
            id: "t1".to_string(),
            task_name: "Review budget".to_string(),
            description: "Q3 numbers".to_string(),
            notes: "ask finance".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 9, 30),
            ..Default::default()
        }]);

        let full = format_tasks(&table, false);
        assert!(full.contains("Found 1 task(s)"));
        assert!(full.contains("- [t1] Review budget (priority: -, status: -)"));
        assert!(full.contains("Due date: 2024-09-30"));
        assert!(full.contains("Notes: ask finance"));

        let short = format_tasks(&table, true);
        assert!(!short.contains("ask finance"));
        assert!(!short.contains("Q3 numbers"));
    }

    #[test]
    fn test_format_bar_chart_scales_to_max() {
        let chart = format_bar_chart(
            "Priority",
            &[("high".to_string(), 2), ("low".to_string(), 1)],
        );
        assert!(chart.contains(&format!("high | {} 2", "#".repeat(BAR_WIDTH))));
        assert!(chart.contains(&format!("low  | {} 1", "#".repeat(BAR_WIDTH / 2))));
    }

    #[test]
    fn test_format_evaluation_sections() {
        let mut best_params = serde_json::Map::new();
        best_params.insert("C".to_string(), serde_json::json!(1.0));
        let evaluation = ModelEvaluation {
            metrics: ModelMetrics {
                accuracy: 0.9,
                precision: 0.9,
                recall: 0.75,
                f1: 0.8123,
            },
            confusion_matrix: vec![vec![4, 1], vec![0, 5]],
            best_params,
        };

        let text = format_evaluation(&evaluation);
        assert!(text.contains("Accuracy:  90.00%"));
        assert!(text.contains("Recall:    75.00%"));
        assert!(text.contains("F1 Score:  81.23%"));
        assert!(text.contains("Confusion Matrix"));
        assert!(text.contains("\"C\": 1.0"));
    }

    #[test]
    fn test_shade_extremes() {
        assert_eq!(shade(0, 10), ' ');
        assert_eq!(shade(10, 10), '█');
        assert_eq!(shade(1, 10), '░');
        assert_eq!(shade(i64::MAX, i64::MAX), '█');
        assert_eq!(shade(i64::MAX / 2, i64::MAX), '▒');
    }
}
