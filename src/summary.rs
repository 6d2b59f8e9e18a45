//! Aggregates behind the dashboard charts

use crate::tasks::{CANONICAL_FIELDS, TaskRecord, TaskTable};

/// Rows shown in the dataset preview
pub const PREVIEW_ROWS: usize = 5;
/// Assignees shown in the workload chart
pub const TOP_ASSIGNEES: usize = 10;
/// Bins of the task duration histogram
pub const DURATION_BINS: usize = 10;

/// Shape of the table and empty cells per column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
    pub missing: Vec<(String, usize)>,
}

impl DatasetInfo {
    pub fn of(table: &TaskTable) -> Self {
        let missing = CANONICAL_FIELDS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let count = table
                    .records
                    .iter()
                    .filter(|r| r.value(i).is_empty())
                    .count();
                (name.to_string(), count)
            })
            .collect();

        Self {
            rows: table.len(),
            columns: CANONICAL_FIELDS.len(),
            missing,
        }
    }
}

/// One histogram bin, `[start, end)` except the last one which includes `end`
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Everything the dashboard charts need
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub info: DatasetInfo,
    pub priority_counts: Vec<(String, usize)>,
    pub status_counts: Vec<(String, usize)>,
    pub duration_histogram: Vec<HistogramBin>,
    pub top_assignees: Vec<(String, usize)>,
    pub preview: Vec<TaskRecord>,
}

impl DashboardSummary {
    pub fn of(table: &TaskTable) -> Self {
        Self {
            info: DatasetInfo::of(table),
            priority_counts: value_counts(table.records.iter().map(|r| r.priority.as_str())),
            status_counts: value_counts(table.records.iter().map(|r| r.status.as_str())),
            duration_histogram: histogram(&task_durations(table), DURATION_BINS),
            top_assignees: value_counts(table.records.iter().map(|r| r.assigned_to.as_str()))
                .into_iter()
                .take(TOP_ASSIGNEES)
                .collect(),
            preview: table.records.iter().take(PREVIEW_ROWS).cloned().collect(),
        }
    }
}

/// Counts of non-empty values, most frequent first, ties in first-seen order
pub fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        match counts.iter_mut().find(|(v, _)| v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    // sort_by is stable, so equal counts keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Days from start to due date, for tasks that have both
pub fn task_durations(table: &TaskTable) -> Vec<i64> {
    table
        .records
        .iter()
        .filter_map(|r| Some((r.due_date? - r.start_date?).num_days()))
        .collect()
}

/// Equal-width histogram over `[min, max]`
///
/// When every value is the same the range is widened to `value ± 0.5`.
pub fn histogram(values: &[i64], bins: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let (low, high) = if min == max {
        (min as f64 - 0.5, max as f64 + 0.5)
    } else {
        (min as f64, max as f64)
    };
    let width = (high - low) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: low + width * i as f64,
            end: if i + 1 == bins {
                high
            } else {
                low + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &value in values {
        let index = (((value as f64 - low) / width) as usize).min(bins - 1);
        result[index].count += 1;
    }
    result
}
