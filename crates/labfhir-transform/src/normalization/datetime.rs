//! Report date reordering and birth-date derivation.
//!
//! Reports print dates day first (`DD/MM/YYYY`). Bundles carry calendar dates
//! as `YYYY-MM-DD`.

use chrono::{Datelike, NaiveDate};

/// Reorders a `DD/MM/YYYY` date into `YYYY-MM-DD`.
///
/// Day and month are zero-padded to two digits; the year is kept as written.
/// Input without exactly three slash-separated parts is returned unchanged, so
/// the function is idempotent on dates that are already `YYYY-MM-DD`.
pub fn reorder_slash_date(value: &str) -> String {
    let trimmed = value.trim();
    if !trimmed.contains('/') {
        return trimmed.to_string();
    }
    let parts: Vec<&str> = trimmed.split('/').map(str::trim).collect();
    match parts.as_slice() {
        [day, month, year] => format!("{year}-{month:0>2}-{day:0>2}"),
        _ => trimmed.to_string(),
    }
}

/// Formats a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// January 1st of `today`'s year minus `age`.
///
/// Returns `None` when the result would precede year 1.
pub fn approximate_birth_date(age: u32, today: NaiveDate) -> Option<NaiveDate> {
    let age = i32::try_from(age).ok()?;
    let year = today.year().checked_sub(age).filter(|year| *year >= 1)?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}
