//! Date parameter validation.
//!
//! The API accepts two spellings: a plain calendar date (`2023-06-01`) and a
//! UTC timestamp with fractional seconds (`2023-06-01T12:30:00.000Z`).

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Result, UddrError};

/// Microsecond precision
const MAX_FRACTION_DIGITS: usize = 6;

/// Returns true if `value` is `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS.fffZ`.
#[must_use]
pub fn is_valid_date(value: &str) -> bool {
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return true;
    }

    // chrono treats the fraction as optional and allows nine digits, the API
    // wants one to six
    let Some(stamp) = value.strip_suffix('Z') else {
        return false;
    };
    let Some((_, fraction)) = stamp.rsplit_once('.') else {
        return false;
    };
    (1..=MAX_FRACTION_DIGITS).contains(&fraction.len())
        && NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

/// Validate a date parameter, naming `field` in the error.
pub fn validate_date(field: &str, value: &str) -> Result<()> {
    if is_valid_date(value) {
        Ok(())
    } else {
        Err(UddrError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_dates() {
        assert!(is_valid_date("2023-06-01"));
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2023-02-30"));
        assert!(!is_valid_date("2023/06/01"));
        assert!(!is_valid_date("06-01-2023"));
    }

    #[test]
    fn test_timestamps() {
        assert!(is_valid_date("2023-06-01T12:30:00.000Z"));
        assert!(is_valid_date("2023-02-23T04:06:20.070714Z"));
        assert!(!is_valid_date("2023-06-01T12:30:00Z"));
        assert!(!is_valid_date("2023-06-01T12:30:00.000"));
        assert!(!is_valid_date("2023-06-01T25:30:00.000Z"));
    }

    #[test]
    fn test_fraction_limited_to_microseconds() {
        assert!(is_valid_date("2023-06-01T12:30:00.1Z"));
        assert!(is_valid_date("2023-06-01T12:30:00.123456Z"));
        assert!(!is_valid_date("2023-06-01T12:30:00.1234567Z"));
        assert!(!is_valid_date("2023-06-01T12:30:00.123456789Z"));
        assert!(!is_valid_date("2023-06-01T12:30:00.Z"));
    }

    #[test]
    fn test_validate_date_names_field() {
        let err = validate_date("start_date", "yesterday").unwrap_err();
        assert!(matches!(err, UddrError::InvalidDate { ref field, .. } if field == "start_date"));
        assert!(err.to_string().contains("yesterday"));
    }
}
