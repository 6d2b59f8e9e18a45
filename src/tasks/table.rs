use super::normalize::normalize;
use super::record::{CANONICAL_FIELDS, TaskRecord};
use anyhow::Result;
use std::io::{Read, Write};

/// A table as read from an uploaded or stored CSV file, before normalization
///
/// Column names are kept verbatim and `None` marks a missing cell.
/// Rows may be shorter than `columns`; missing trailing cells count as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string literals, treating `""` as a missing cell
    pub fn from_strings(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell_value(cell)).collect())
                .collect(),
        }
    }

    /// Read a CSV document with a header row
    ///
    /// Invalid UTF-8 is replaced rather than rejected and ragged rows are accepted,
    /// so the only failures are I/O errors of the underlying reader.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();

        let mut table = RawTable::new(columns);
        for record in csv_reader.byte_records() {
            let record = record?;
            let row = record
                .iter()
                .map(|cell| cell_value(&String::from_utf8_lossy(cell)))
                .collect();
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Cell at (`row`, `column`), `None` when missing or out of range
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn cell_value(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// The canonical task table: nine fixed columns, one [`TaskRecord`] per row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    pub records: Vec<TaskRecord>,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        Self { records }
    }

    /// Column names, always the canonical nine in fixed order
    pub fn columns(&self) -> Vec<String> {
        CANONICAL_FIELDS.iter().map(|c| c.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: TaskRecord) {
        self.records.push(record);
    }

    /// Convert back to a raw table (ISO dates, empty values as missing cells)
    pub fn to_raw(&self) -> RawTable {
        RawTable {
            columns: self.columns(),
            rows: self
                .records
                .iter()
                .map(|r| r.values().into_iter().map(|v| cell_value(&v)).collect())
                .collect(),
        }
    }

    /// Read and normalize a CSV document
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        Ok(normalize(&RawTable::from_csv(reader)?))
    }

    /// Write the table as CSV with the canonical header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CANONICAL_FIELDS)?;
        for record in &self.records {
            csv_writer.write_record(record.values())?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
