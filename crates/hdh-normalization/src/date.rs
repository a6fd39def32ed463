//! Start-date parsing.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use hdh_model::is_missing;

/// Parse the year of a register start date.
///
/// Returns `None` for missing or unparseable values; such records never
/// match a start-year selection.
pub fn parse_start_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return None;
    }
    try_parse_datetime(trimmed)
        .map(|dt| dt.year())
        .or_else(|| try_parse_date(trimmed).map(|d| d.year()))
        .or_else(|| try_parse_partial(trimmed))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d", // 2023-05-01
        "%d/%m/%Y", // 01/05/2023
        "%Y/%m/%d", // 2023/05/01
        "%d-%m-%Y", // 01-05-2023
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Year-month (`YYYY-MM`) or bare year values.
fn try_parse_partial(value: &str) -> Option<i32> {
    if value.len() == 7 && value.as_bytes().get(4) == Some(&b'-') {
        let year = value[0..4].parse::<i32>().ok()?;
        let month = value[5..7].parse::<u32>().ok()?;
        return (1..=12).contains(&month).then_some(year);
    }

    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        return value.parse::<i32>().ok();
    }

    None
}
