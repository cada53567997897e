use chrono::NaiveDate;

use crate::utils::constants::{ISO_DATE_FORMAT, SOURCE_DATE_FORMAT};

/// Shortest round-trip rendering: `5.0` as `5`, `33.6` as `33.6`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Parse an optional numeric cell. Blank cells are `None`.
pub fn parse_optional_number(
    value: &str,
) -> Option<std::result::Result<f64, std::num::ParseFloatError>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.parse::<f64>())
    }
}

/// Dates appear as `YYYYMMDD` in OxCGRT exports and as ISO dates elsewhere.
pub fn parse_table_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    parse_compact_date(trimmed).or_else(|| parse_iso_date(trimmed))
}

/// Exactly eight digits, `YYYYMMDD`. chrono alone accepts one-digit months
/// and days, so the shape is checked first.
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, SOURCE_DATE_FORMAT).ok()
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
