//! Cell-level predicates behind field-type classification.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens that stand for a missing value once trimmed and lowercased.
const IGNORABLE_TOKENS: &[&str] = &["na", "n/a", "none"];

/// Date-only formats accepted by the timestamp check.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Time-only formats accepted by the timestamp check.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p"];

/// Combined date-and-time formats accepted by the timestamp check.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
];

// Every accepted shape starts with 1-4 digits followed by a date or time
// separator, so anything else can be rejected without trying the format
// lists. Compiled once on first use.
static TIMESTAMP_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,4}[-/:]").unwrap());

/// Whether a cell stands for "missing / not applicable".
///
/// Ignorable cells satisfy any type check, so sparse columns are not
/// disqualified by their gaps. Whitespace-only cells count as ignorable.
pub(crate) fn is_ignorable(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || IGNORABLE_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Whether a cell parses as a real number (decimal or scientific notation).
pub(crate) fn is_numeric(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

/// Whether a cell parses as a calendar date, a clock time, or both.
pub(crate) fn is_timestamp(value: &str) -> bool {
    let trimmed = value.trim();
    if !TIMESTAMP_SHAPE.is_match(trimmed) {
        return false;
    }

    DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
        || TIME_FORMATS
            .iter()
            .any(|fmt| NaiveTime::parse_from_str(trimmed, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_true() {
        assert!(is_numeric("1"));
        assert!(is_numeric("1.0"));
        assert!(is_numeric("-1.0"));
        assert!(is_numeric("-1e-12"));
        assert!(is_numeric(" 36.446 "));
    }

    #[test]
    fn test_is_numeric_false() {
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("three"));
        assert!(!is_numeric("2013-12-30"));
    }

    #[test]
    fn test_is_timestamp_true() {
        assert!(is_timestamp("2013-12-30"));
        assert!(is_timestamp("12/30/2013"));
        assert!(is_timestamp("08:30 AM"));
        assert!(is_timestamp("08:30PM"));
        assert!(is_timestamp("1:55 PM"));
        assert!(is_timestamp("14:55"));
        assert!(is_timestamp("12/30/2013 8:30 AM"));
        assert!(is_timestamp("2013-12-30T14:55:02"));
    }

    #[test]
    fn test_is_timestamp_false() {
        assert!(!is_timestamp("abc"));
        assert!(!is_timestamp("now"));
        assert!(!is_timestamp("123"));
        assert!(!is_timestamp("36.446"));
    }

    #[test]
    fn test_is_ignorable() {
        for value in ["", " ", "na", "NA", "N/A", "None", "  \tn/a", "nonE"] {
            assert!(is_ignorable(value), "expected {value:?} to be ignorable");
        }
        assert!(!is_ignorable("0"));
        assert!(!is_ignorable("nah"));
    }
}
