//! Field-level input validation shared by the services.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use crate::constants::{formats, messages};

/// Validation failures keyed by input field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records `message` for `field`, keeping the first message per field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, messages::NOT_BLANK);
        }
    }

    pub fn require_positive(&mut self, field: &str, value: i32) {
        if value <= 0 {
            self.add(field, messages::POSITIVE);
        }
    }

    /// Parses `value` as a `YYYY-MM-DD` date, recording an error on failure.
    pub fn require_date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        if value.trim().is_empty() {
            self.add(field, messages::NOT_BLANK);
            return None;
        }

        let parsed = parse_date(value);
        if parsed.is_none() {
            self.add(field, messages::INVALID_DATE);
        }
        parsed
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Years that keep their four-digit form once stored. SQLite compares the
/// stored timestamps as text, so `+10000-..` or `-0001-..` would sort wrongly.
const STORABLE_YEARS: RangeInclusive<i32> = 1..=9999;

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), formats::DATE)
        .ok()
        .filter(|d| STORABLE_YEARS.contains(&d.year()))
}

/// Parses a show start time in any of the accepted spellings.
#[must_use]
pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    formats::START_TIME_INPUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .filter(|t| STORABLE_YEARS.contains(&t.year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_time_accepts_supported_spellings() {
        let expected =
            NaiveDateTime::parse_from_str("2020-09-28 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();

        assert_eq!(parse_start_time("2020-09-28 12:00:00"), Some(expected));
        assert_eq!(parse_start_time("2020-09-28T12:00:00"), Some(expected));
        assert_eq!(parse_start_time("2020-09-28 12:00"), Some(expected));
        assert_eq!(parse_start_time(" 2020-09-28T12:00 "), Some(expected));
    }

    #[test]
    fn test_parse_start_time_rejects_garbage() {
        assert_eq!(parse_start_time(""), None);
        assert_eq!(parse_start_time("tomorrow"), None);
        assert_eq!(parse_start_time("2020-02-30 12:00:00"), None);
        assert_eq!(parse_start_time("2020-09-28"), None);
    }

    #[test]
    fn test_years_outside_four_digits_are_rejected() {
        assert_eq!(parse_start_time("+10000-01-01 00:00:00"), None);
        assert_eq!(parse_start_time("-0001-06-01 12:00:00"), None);
        assert_eq!(parse_start_time("0000-06-01 12:00:00"), None);
        assert!(parse_start_time("9999-12-31 23:30:00").is_some());
        assert!(parse_start_time("0001-01-01 00:00").is_some());

        assert_eq!(parse_date("+10000-01-01"), None);
        assert_eq!(parse_date("0000-12-31"), None);
        assert!(parse_date("9999-12-31").is_some());
    }

    #[test]
    fn test_field_errors_collects_per_field() {
        let mut errors = FieldErrors::new();
        errors.require_text("name", "   ");
        errors.require_positive("capacity", 0);
        errors.require_positive("capacity", -5);
        errors.require_text("title", "Tenet");

        assert_eq!(errors.get("name"), Some(messages::NOT_BLANK));
        assert_eq!(errors.get("capacity"), Some(messages::POSITIVE));
        assert_eq!(errors.get("title"), None);
        assert_eq!(
            errors.to_string(),
            "capacity: This value should be positive.; name: This value should not be blank."
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_require_date() {
        let mut errors = FieldErrors::new();
        assert!(errors.require_date("release_date", "2020-08-26").is_some());
        assert!(errors.is_empty());

        assert!(errors.require_date("release_date", "26/08/2020").is_none());
        assert_eq!(errors.get("release_date"), Some(messages::INVALID_DATE));
    }
}
