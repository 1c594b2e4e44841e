//! Date normalization and coercion for frontmatter date fields.
//!
//! Content tools frequently write dates as `01/19/2026` or `2026/1/19`, which a
//! strict ISO parser either rejects or misreads. [`normalize_date_input`]
//! rewrites those shapes to `YYYY-MM-DD` and leaves everything else alone;
//! [`coerce_date`] then turns the result into a timestamp.
//!
//! Slash dates with the year last are always read month first. A value such
//! as `03/04/2026` written with day/month order is silently taken as March 4.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

static ISO_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid ISO prefix pattern"));

static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})$").expect("valid year-first pattern")
});

static YEAR_LAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("valid year-last pattern")
});

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const LONG_FORM_DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];

/// A date field value: either a native timestamp or a raw frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Already a date; never rewritten.
    Native(DateTime<Utc>),
    /// Raw value as it appeared in the frontmatter.
    Raw(JsonValue),
}

impl DateInput {
    /// Applies [`normalize_date_input`] to raw values.
    pub fn normalize(self) -> Self {
        match self {
            DateInput::Native(_) => self,
            DateInput::Raw(value) => DateInput::Raw(normalize_date_input(&value).into_owned()),
        }
    }

    /// Normalizes, then coerces into a timestamp.
    pub fn resolve(self) -> Option<DateTime<Utc>> {
        match self.normalize() {
            DateInput::Native(date) => Some(date),
            DateInput::Raw(value) => coerce_date(&value),
        }
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(date: DateTime<Utc>) -> Self {
        DateInput::Native(date)
    }
}

impl From<JsonValue> for DateInput {
    fn from(value: JsonValue) -> Self {
        DateInput::Raw(value)
    }
}

/// Rewrites known ambiguous date strings to `YYYY-MM-DD`.
///
/// Null, non-string, blank and unrecognized values are returned unchanged so
/// the date parser makes the final call. This function never fails.
pub fn normalize_date_input(value: &JsonValue) -> Cow<'_, JsonValue> {
    let JsonValue::String(raw) = value else {
        return Cow::Borrowed(value);
    };

    match normalize_date_str(raw) {
        Some(normalized) if normalized != *raw => Cow::Owned(JsonValue::String(normalized)),
        _ => Cow::Borrowed(value),
    }
}

/// String form of [`normalize_date_input`].
///
/// Returns `None` when the input is blank or matches no known shape.
pub fn normalize_date_str(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return None;
    }

    if ISO_PREFIX.is_match(trimmed) {
        return Some(trimmed.to_string());
    }

    if let Some(caps) = YEAR_FIRST.captures(trimmed) {
        return Some(format!("{}-{:0>2}-{:0>2}", &caps[1], &caps[2], &caps[3]));
    }

    if let Some(caps) = YEAR_LAST.captures(trimmed) {
        return Some(format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[1], &caps[2]));
    }

    None
}

/// Whitespace as ECMAScript `String.prototype.trim` sees it: BOM included, NEL not.
fn is_js_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Coerces a (normalized) frontmatter value into a UTC timestamp.
///
/// Accepts ISO dates (midnight UTC), ISO date-times without offset (read as
/// UTC), RFC 3339, RFC 2822, long-form English dates, and numbers as
/// milliseconds since the Unix epoch. Impossible calendar dates yield `None`.
pub fn coerce_date(value: &JsonValue) -> Option<DateTime<Utc>> {
    match value {
        JsonValue::String(s) => parse_date_str(s),
        JsonValue::Number(n) => {
            let millis = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

/// Parses a date string in any of the shapes [`coerce_date`] accepts.
pub fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    LONG_FORM_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
