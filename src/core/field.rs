//! Field addressing and string formats

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;
use validator::ValidateEmail;

use super::coerce::{parse_bool, value_as_bool};

/// A dot-separated path into a JSON payload (e.g. `location.city`)
///
/// Segments address object members; numeric segments also index arrays, so
/// `images.0.url` reaches into the first element of `images`. There is no
/// depth limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Resolve the path against a payload
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments().try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Resolve the path mutably against a payload
    pub fn lookup_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        self.segments().try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(move |i| items.get_mut(i)),
            _ => None,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Named field formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    Email,
    /// At least 6 characters with a lowercase letter, an uppercase letter and a digit
    Password,
    /// Digits, spaces, `+`, `-` and parentheses
    Phone,
    /// 24-hour `HH:MM`, hour zero-padding optional
    Time,
    /// ISO 8601 calendar date or date-time
    IsoDate,
    /// Storage identifier: 24 hexadecimal characters
    StorageKey,
    /// JSON boolean or the literals `"true"` / `"false"`
    Boolean,
}

impl FieldFormat {
    /// Check a value against this format
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldFormat::Boolean => value_as_bool(value).is_some(),
            _ => value.as_str().is_some_and(|s| self.matches_str(s)),
        }
    }

    fn matches_str(&self, s: &str) -> bool {
        match self {
            FieldFormat::Email => s.validate_email(),
            FieldFormat::Password => Self::is_valid_password(s),
            FieldFormat::Phone => Self::is_valid_phone(s),
            FieldFormat::Time => Self::is_valid_time(s),
            FieldFormat::IsoDate => parse_iso_date(s).is_some(),
            FieldFormat::StorageKey => Self::is_valid_storage_key(s),
            FieldFormat::Boolean => parse_bool(s).is_some(),
        }
    }

    fn is_valid_password(password: &str) -> bool {
        password.chars().count() >= 6
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_digit())
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"^[\d\s+\-()]+$").unwrap());
        regex.is_match(phone)
    }

    fn is_valid_time(time: &str) -> bool {
        static TIME_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            TIME_REGEX.get_or_init(|| Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());
        regex.is_match(time)
    }

    fn is_valid_storage_key(key: &str) -> bool {
        static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = KEY_REGEX.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());
        regex.is_match(key)
    }
}

/// Parse an ISO 8601 date or date-time and return its calendar date
///
/// Date-times keep the date as written; no timezone conversion is applied.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|datetime| datetime.date())
}
