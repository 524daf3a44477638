//! Shared parsing utilities for the incident CSV export.
//!
//! Numeric coercion mirrors the "errors become absent" contract: blank,
//! `NA`, or otherwise unparseable values produce `None` rather than a
//! load failure.

/// Parses an optional string field. Blank and whitespace-only values
/// become `None`.
#[must_use]
pub fn parse_opt_string(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Parses an optional floating-point field. Anything that does not parse
/// as a finite number becomes `None`.
#[must_use]
pub fn parse_opt_f64(s: &str) -> Option<f64> {
    let value = s.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parses an optional year field. Accepts integral values and values with
/// a fractional part of zero (spreadsheet exports often render years as
/// `2019.0`).
#[must_use]
pub fn parse_opt_year(s: &str) -> Option<i32> {
    if let Ok(year) = s.trim().parse::<i32>() {
        return Some(year);
    }
    let value = parse_opt_f64(s)?;
    if value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        return Some(value as i32);
    }
    None
}
