//! Lenient calendar date parsing for the task file
//!
//! Dates in uploaded files come in many shapes. Anything that cannot be read
//! as a date yields `None`; callers turn that into the empty sentinel.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const NAMED_MONTH_FORMATS: [&str; 8] = [
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
];

/// Parse a date string, day-first when the numeric form is ambiguous
///
/// "03/04/2024" is 3 April 2024. A month-first reading is used only when the
/// day-first one is impossible ("12/25/2024").
pub fn parse_date_lenient(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(date) = parse_numeric(s) {
        return Some(date);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }

    // Any trailing time part: keep the leading date
    if let Some((head, _)) = s.split_once(['T', ' '])
        && let Some(date) = parse_numeric(head)
    {
        return Some(date);
    }

    NAMED_MONTH_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Three numeric components separated by `/`, `-` or `.`
fn parse_numeric(s: &str) -> Option<NaiveDate> {
    let separator = s.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let parts: Vec<&str> = s.split(separator).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    if parts[0].len() == 4 {
        // Year first: always Y-M-D
        let year = parts[0].parse().ok()?;
        let month = parts[1].parse().ok()?;
        let day = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if parts[0].len() > 2 || parts[1].len() > 2 {
        return None;
    }
    let year = expand_year(parts[2])?;
    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;

    NaiveDate::from_ymd_opt(year, second, first)
        .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

fn expand_year(s: &str) -> Option<i32> {
    let value: i32 = s.parse().ok()?;
    match s.len() {
        4 => Some(value),
        2 if value < 69 => Some(2000 + value),
        2 => Some(1900 + value),
        _ => None,
    }
}
