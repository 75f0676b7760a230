// Display formatting: human sizes, column comparators, timestamps

use crate::models::DatabaseRecord;
use crate::sort::SortColumn;
use chrono::{DateTime, TimeZone, Utc};
use chrono_humanize::HumanTime;
use std::cmp::Ordering;

const SIZE_UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Formats a byte count with one fractional digit in binary units, never past TiB.
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut index = 0;

    while size > 1024.0 && index < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        index += 1;
    }

    format!("{:.1} {}", size, SIZE_UNITS[index])
}

/// Three-way comparator over one column. `direction` is +1 for natural order, -1 for reversed.
pub fn compare_by(
    column: SortColumn,
    direction: i8,
) -> impl Fn(&DatabaseRecord, &DatabaseRecord) -> Ordering {
    move |a, b| {
        let ordering = match column {
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::User => a.user.cmp(&b.user),
            SortColumn::Size => a.size_bytes.cmp(&b.size_bytes),
            SortColumn::Modified => a.modified_at.cmp(&b.modified_at),
        };
        if direction < 0 {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Absolute timestamp as `YYYY.MM.DD HH:mm` in the given zone.
pub fn format_timestamp<Tz>(secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_opt(secs, 0).single() {
        Some(t) => t.format("%Y.%m.%d %H:%M").to_string(),
        None => secs.to_string(),
    }
}

/// Relative phrasing of `secs` as seen from `now`, e.g. "3 hours ago" or "in a minute".
pub fn relative_time(secs: i64, now: DateTime<Utc>) -> String {
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(then) => HumanTime::from(then - now).to_string(),
        None => secs.to_string(),
    }
}
