//! Task table domain: records, raw and canonical tables, and normalization
//!
//! Split into submodules:
//! - `record`: canonical task record and the entry-time enums
//! - `table`: raw (as uploaded) and canonical tables, CSV reading and writing
//! - `dates`: lenient date parsing
//! - `normalize`: raw → canonical schema mapping

mod dates;
mod normalize;
mod record;
mod table;

pub use dates::parse_date_lenient;
pub use normalize::{canonical_column_name, normalize};
pub use record::{
    CANONICAL_FIELDS, DATE_FORMAT, Priority, TaskError, TaskRecord, TaskStatus, format_date,
    local_date_today,
};
pub use table::{RawTable, TaskTable};
