//! ISO calendar-date keys for the record map.
//!
//! Keys are fixed-width, zero-padded `YYYY-MM-DD` strings. Because the width
//! is fixed, lexicographic order on keys equals chronological order, which the
//! default-rate resolver relies on.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateKeyError;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A validated calendar date used as a record-map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month (1-12) and day components.
    ///
    /// # Errors
    ///
    /// Returns [`DateKeyError::InvalidDate`] if the components do not name a real day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateKeyError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DateKeyError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The storage form of this key.
    #[must_use]
    pub fn as_key(&self) -> String {
        self.0.format(KEY_FORMAT).to_string()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(s)
            .map(Self)
            .ok_or_else(|| DateKeyError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.as_key()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Parse a raw map key, accepting only the zero-padded `YYYY-MM-DD` form.
///
/// Returns `None` for anything else, including unpadded forms like
/// `2024-1-5` that chrono would otherwise accept.
#[must_use]
pub fn parse_key(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(raw, KEY_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_zero_padded() {
        let key = DateKey::from_ymd(2024, 1, 5).unwrap();
        assert_eq!(key.to_string(), "2024-01-05");
        assert_eq!(key.as_key(), "2024-01-05");
    }

    #[test]
    fn parse_rejects_unpadded_and_garbage() {
        assert!(parse_key("2024-1-5").is_none());
        assert!(parse_key("2024/01/05").is_none());
        assert!(parse_key("not-a-date").is_none());
        assert!(parse_key("2024-02-30").is_none());
        assert!(parse_key("").is_none());
    }

    #[test]
    fn parse_accepts_iso_dates() {
        let date = parse_key("2024-02-29").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn from_ymd_rejects_impossible_day() {
        let err = DateKey::from_ymd(2023, 2, 29).unwrap_err();
        assert_eq!(err, DateKeyError::InvalidDate("2023-02-29".to_string()));
    }

    #[test]
    fn lexicographic_order_matches_chronological_order() {
        let mut keys = vec![
            DateKey::from_ymd(2024, 10, 1).unwrap().as_key(),
            DateKey::from_ymd(2024, 2, 1).unwrap().as_key(),
            DateKey::from_ymd(2023, 12, 31).unwrap().as_key(),
        ];
        keys.sort();
        assert_eq!(keys, vec!["2023-12-31", "2024-02-01", "2024-10-01"]);
    }

    #[test]
    fn serde_uses_string_form() {
        let key = DateKey::from_ymd(2024, 3, 9).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03-09\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"2024-3-9\"").is_err());
    }
}
