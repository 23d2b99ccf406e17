//! Terminal views for fetched resources.
//!
//! Each view renders to a `String` so commands can print the result or
//! swap in a cached snapshot; the data is already decoded into models,
//! so no view null-checks.

pub mod agents;
pub mod alerts;
pub mod cases;
pub mod dashboard;
pub mod rules;
pub mod session;

use chrono::{DateTime, Utc};

/// Render a UTC timestamp for table output.
pub(crate) fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Render a date for card output.
pub(crate) fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Widest cell in a column, never narrower than its header.
pub(crate) fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(str::len).fold(header.len(), usize::max)
}
