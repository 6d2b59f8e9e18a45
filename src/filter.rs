//! Filter engine for the task view
//!
//! Filters on status, priority and assignee, then sorts by due date.

use crate::tasks::{TaskRecord, TaskTable};
use std::collections::BTreeSet;

/// Fields the task view can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Status,
    Priority,
    AssignedTo,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [
        FilterField::Status,
        FilterField::Priority,
        FilterField::AssignedTo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Status => "status",
            FilterField::Priority => "priority",
            FilterField::AssignedTo => "assigned_to",
        }
    }

    fn value<'a>(&self, record: &'a TaskRecord) -> &'a str {
        match self {
            FilterField::Status => &record.status,
            FilterField::Priority => &record.priority,
            FilterField::AssignedTo => &record.assigned_to,
        }
    }
}

/// Accepted values per field
///
/// `None` is the default selection: every value currently present.
/// An empty set accepts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    pub status: Option<BTreeSet<String>>,
    pub priority: Option<BTreeSet<String>>,
    pub assigned_to: Option<BTreeSet<String>>,
}

impl Selections {
    /// Selections accepting every distinct value present in `table`
    pub fn all_of(table: &TaskTable) -> Self {
        let set = |field: FilterField| -> Option<BTreeSet<String>> {
            Some(distinct_values(table, field).into_iter().collect())
        };
        Self {
            status: set(FilterField::Status),
            priority: set(FilterField::Priority),
            assigned_to: set(FilterField::AssignedTo),
        }
    }

    fn accepted(&self, field: FilterField) -> Option<&BTreeSet<String>> {
        match field {
            FilterField::Status => self.status.as_ref(),
            FilterField::Priority => self.priority.as_ref(),
            FilterField::AssignedTo => self.assigned_to.as_ref(),
        }
    }

    fn matches(&self, record: &TaskRecord) -> bool {
        FilterField::ALL.iter().all(|field| {
            self.accepted(*field)
                .is_none_or(|set| set.contains(field.value(record)))
        })
    }
}

/// Distinct values of `field`, in first-seen order
pub fn distinct_values(table: &TaskTable, field: FilterField) -> Vec<String> {
    let mut seen = BTreeSet::new();
    table
        .records
        .iter()
        .map(|r| field.value(r))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Rows matching every field's accepted set, ascending by due date
///
/// Missing due dates sort before all real dates. The sort is stable.
pub fn filter(table: &TaskTable, selections: &Selections) -> TaskTable {
    let mut records: Vec<TaskRecord> = table
        .records
        .iter()
        .filter(|r| selections.matches(r))
        .cloned()
        .collect();
    records.sort_by_key(|r| r.due_date);
    TaskTable::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(
        id: &str,
        status: &str,
        priority: &str,
        who: &str,
        due: Option<(i32, u32, u32)>,
    ) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            task_name: format!("Task {}", id),
            status: status.to_string(),
            priority: priority.to_string(),
            assigned_to: who.to_string(),
            due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ..Default::default()
        }
    }

    fn sample() -> TaskTable {
        TaskTable::from_records(vec![
            task("1", "pending", "high", "ana", Some((2024, 5, 1))),
            task("2", "completed", "low", "bo", None),
            task("3", "pending", "medium", "bo", Some((2024, 1, 15))),
            task("4", "in progress", "high", "", Some((2024, 3, 9))),
        ])
    }

    fn ids(table: &TaskTable) -> Vec<&str> {
        table.records.iter().map(|r| r.id.as_str()).collect()
    }

    fn set(values: &[&str]) -> Option<BTreeSet<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_default_selection_only_sorts() {
        let table = sample();
        let result = filter(&table, &Selections::default());
        assert_eq!(ids(&result), vec!["2", "3", "4", "1"]);
    }

    #[test]
    fn test_full_selection_equals_default() {
        let table = sample();
        assert_eq!(
            filter(&table, &Selections::all_of(&table)),
            filter(&table, &Selections::default())
        );
    }

    #[test]
    fn test_and_across_fields_or_within_field() {
        let table = sample();
        let selections = Selections {
            status: set(&["pending", "in progress"]),
            priority: set(&["high"]),
            assigned_to: None,
        };
        assert_eq!(ids(&filter(&table, &selections)), vec!["4", "1"]);
    }

    #[test]
    fn test_empty_accepted_set_yields_nothing() {
        let table = sample();
        let selections = Selections {
            assigned_to: set(&[]),
            ..Default::default()
        };
        assert!(filter(&table, &selections).is_empty());
    }

    #[test]
    fn test_empty_assignee_is_a_selectable_value() {
        let table = sample();
        let selections = Selections {
            assigned_to: set(&[""]),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&table, &selections)), vec!["4"]);
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let table = sample();
        assert_eq!(
            distinct_values(&table, FilterField::AssignedTo),
            vec!["ana", "bo", ""]
        );
        assert_eq!(
            distinct_values(&table, FilterField::Status),
            vec!["pending", "completed", "in progress"]
        );
    }
}
