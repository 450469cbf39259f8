//! # Quantity Parsing and Formatting
//!
//! Quantities travel through the system as locale-formatted decimal strings
//! using the French convention (comma as decimal separator). Parsing is
//! deliberately lenient: anything unreadable degrades to zero rather than
//! erroring, because these values come straight from free-form table cells.
//!
//! Two formatters exist on purpose:
//!
//! - [`format_qty`] keeps the full fixed 3-decimal width (`"0,000"`), used in
//!   running entry tables where column alignment matters
//! - [`format_qty_trimmed`] drops trailing zeros (`"2,5"`, `"0"`), used in
//!   totals and recap views
//!
//! ## Example
//!
//! ```rust
//! use fer_core::numfmt::{format_qty_trimmed, parse_qty};
//!
//! assert_eq!(parse_qty("12,5"), 12.5);
//! assert_eq!(parse_qty("abc"), 0.0);
//! assert_eq!(format_qty_trimmed(2.5), "2,5");
//! ```

use chrono::NaiveDate;

/// Parse a user-entered quantity string.
///
/// Strips all whitespace, replaces the decimal comma with a dot, then parses
/// as `f64`. Empty, non-numeric or non-finite input yields `0.0`. Never
/// errors.
pub fn parse_qty(raw: &str) -> f64 {
    let compact: String = raw.split_whitespace().collect();
    if compact.is_empty() {
        return 0.0;
    }
    let normalized = compact.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Format a quantity with fixed 3-decimal precision and a decimal comma.
///
/// `8.8888` becomes `"8,889"`, `0.0` becomes `"0,000"`.
pub fn format_qty(value: f64) -> String {
    let v = if value.is_finite() { value } else { 0.0 };
    format!("{v:.3}").replace('.', ",")
}

/// Format a quantity with 3-decimal precision, trailing zeros trimmed.
///
/// `2.5` becomes `"2,5"`, `0.0` becomes `"0"`. A `-0` integer part produced
/// by rounding tiny negatives is normalized to `0`.
pub fn format_qty_trimmed(value: f64) -> String {
    let fixed = format_qty(value);
    let (raw_int, raw_dec) = match fixed.split_once(',') {
        Some((i, d)) => (i, d),
        None => (fixed.as_str(), ""),
    };
    let int_part = if raw_int == "-0" { "0" } else { raw_int };
    let dec_part = raw_dec.trim_end_matches('0');
    if dec_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part},{dec_part}")
    }
}

/// Format a calendar date for display, French style (`dd/mm/yyyy`).
pub fn format_date_fr(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format an ISO date string (`YYYY-MM-DD`, or a longer timestamp starting
/// with one) for display. Missing or unreadable dates render as an em dash.
pub fn format_iso_date_fr(iso: Option<&str>) -> String {
    let Some(raw) = iso else {
        return "—".to_string();
    };
    let head = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(head, "%Y-%m-%d") {
        Ok(d) => format_date_fr(d),
        Err(_) => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_qty(""), 0.0);
        assert_eq!(parse_qty("   "), 0.0);
        assert_eq!(parse_qty("abc"), 0.0);
        assert_eq!(parse_qty("1,2,3"), 0.0);
        assert_eq!(parse_qty("12,5"), 12.5);
        assert_eq!(parse_qty("12.5"), 12.5);
        assert_eq!(parse_qty(" 1 250,75 "), 1250.75);
        assert_eq!(parse_qty("-3,2"), -3.2);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_qty(0.0), "0,000");
        assert_eq!(format_qty(8.8888), "8,889");
        assert_eq!(format_qty(2.5), "2,500");
    }

    #[test]
    fn test_format_trimmed() {
        assert_eq!(format_qty_trimmed(2.5), "2,5");
        assert_eq!(format_qty_trimmed(0.0), "0");
        assert_eq!(format_qty_trimmed(2.0), "2");
        assert_eq!(format_qty_trimmed(1234.567), "1234,567");
        // Tiny negatives round to -0.000 and must not display a minus sign.
        assert_eq!(format_qty_trimmed(-0.0001), "0");
    }

    #[test]
    fn test_round_trip_canonical_strings() {
        for s in ["2,5", "0", "17,125", "3"] {
            assert_eq!(format_qty_trimmed(parse_qty(s)), s);
        }
    }

    #[test]
    fn test_date_formatting() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(format_date_fr(d), "09/03/2025");
        assert_eq!(format_iso_date_fr(Some("2025-03-09")), "09/03/2025");
        assert_eq!(format_iso_date_fr(Some("2025-03-09T12:30:00Z")), "09/03/2025");
        assert_eq!(format_iso_date_fr(Some("not-a-date")), "—");
        assert_eq!(format_iso_date_fr(None), "—");
    }
}
