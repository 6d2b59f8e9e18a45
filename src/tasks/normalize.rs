//! Schema normalization of raw task tables
//!
//! Uploaded and stored files use whatever headers their producer chose.
//! [`normalize`] maps them onto the canonical nine-column schema and never fails:
//! unknown columns are dropped, absent ones are filled with empty values and
//! unreadable dates become empty.

use super::dates::parse_date_lenient;
use super::record::{CANONICAL_FIELDS, TaskRecord};
use super::table::{RawTable, TaskTable};

/// Legacy or human-friendly headers and their canonical names
const COLUMN_RENAMES: [(&str, &str); 5] = [
    ("task id", "id"),
    ("task name", "task_name"),
    ("assigned to", "assigned_to"),
    ("start date", "start_date"),
    ("due date", "due_date"),
];

/// Header cleanup: trim, lower-case, then apply the rename table
pub fn canonical_column_name(header: &str) -> String {
    let cleaned = header.trim().to_lowercase();
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == cleaned)
        .map(|(_, to)| to.to_string())
        .unwrap_or(cleaned)
}

/// Map a raw table onto the canonical task schema
///
/// When two raw headers end up with the same name, the first one wins.
/// `priority` and `status` values are passed through unchecked.
pub fn normalize(raw: &RawTable) -> TaskTable {
    let names: Vec<String> = raw
        .columns
        .iter()
        .map(|c| canonical_column_name(c))
        .collect();

    // Source column for each canonical field, None when absent
    let sources: Vec<Option<usize>> = CANONICAL_FIELDS
        .iter()
        .map(|field| names.iter().position(|n| n == field))
        .collect();

    let records = (0..raw.row_count())
        .map(|row| {
            let text = |field: usize| -> String {
                sources[field]
                    .and_then(|col| raw.cell(row, col))
                    .map(str::to_string)
                    .unwrap_or_default()
            };
            let date = |field: usize| {
                sources[field]
                    .and_then(|col| raw.cell(row, col))
                    .and_then(parse_date_lenient)
            };

            TaskRecord {
                id: text(0),
                task_name: text(1),
                description: text(2),
                assigned_to: text(3),
                priority: text(4),
                status: text(5),
                start_date: date(6),
                due_date: date(7),
                notes: text(8),
            }
        })
        .collect();

    TaskTable::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_canonical_column_name() {
        assert_eq!(canonical_column_name("  Task Name "), "task_name");
        assert_eq!(canonical_column_name("DUE DATE"), "due_date");
        assert_eq!(canonical_column_name("Task ID"), "id");
        assert_eq!(canonical_column_name("Priority"), "priority");
        assert_eq!(canonical_column_name("Custom Field"), "custom field");
    }

    #[test]
    fn test_normalize_renames_and_fills_missing_columns() {
        let raw = RawTable::from_strings(
            &[" Task Name", "Assigned To", "Due Date", "Priority", "Extra"],
            &[&["Ship release", "Ana", "03/04/2024", "high", "dropped"]],
        );

        let table = normalize(&raw);
        assert_eq!(table.len(), 1);
        let record = &table.records[0];
        assert_eq!(record.task_name, "Ship release");
        assert_eq!(record.assigned_to, "Ana");
        assert_eq!(record.priority, "high");
        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2024, 4, 3));
        assert_eq!(record.id, "");
        assert_eq!(record.status, "");
        assert_eq!(record.start_date, None);
        assert_eq!(record.notes, "");
    }

    #[test]
    fn test_normalize_unparseable_dates_become_empty() {
        let raw = RawTable::from_strings(
            &["start_date", "due_date"],
            &[&["someday", "2024-13-01"]],
        );

        let table = normalize(&raw);
        assert_eq!(table.records[0].start_date, None);
        assert_eq!(table.records[0].due_date, None);
        assert_eq!(table.records[0].value(6), "");
        assert_eq!(table.records[0].value(7), "");
    }

    #[test]
    fn test_normalize_keeps_out_of_enum_values() {
        let raw = RawTable::from_strings(&["priority", "status"], &[&["blocker", "waiting"]]);

        let table = normalize(&raw);
        assert_eq!(table.records[0].priority, "blocker");
        assert_eq!(table.records[0].status, "waiting");
    }

    #[test]
    fn test_normalize_first_duplicate_column_wins() {
        let raw = RawTable::from_strings(&["Task Name", "task_name"], &[&["first", "second"]]);

        let table = normalize(&raw);
        assert_eq!(table.records[0].task_name, "first");
    }

    #[test]
    fn test_normalize_empty_input() {
        let table = normalize(&RawTable::default());
        assert!(table.is_empty());
        assert_eq!(table.columns(), CANONICAL_FIELDS.to_vec());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = RawTable::from_strings(
            &["Task ID", "Task Name", "Start Date", "due date", "notes"],
            &[
                &["1", "Alpha", "01/02/2024", "bad", ""],
                &["2", "", "", "2024-05-06 08:00", "note"],
            ],
        );

        let once = normalize(&raw);
        let twice = normalize(&once.to_raw());
        assert_eq!(once, twice);
    }
}
