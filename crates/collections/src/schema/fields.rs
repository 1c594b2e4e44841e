//! Typed field readers that record violations instead of failing fast.

use chrono::{DateTime, Utc};
use quire_core::{
    DateInput, FieldPath, RawRecord, ValidationError, ViolationKind, canonicalize_tags,
    json_type_name, utf16_len,
};
use serde_json::Value as JsonValue;

/// Reads fields out of one object of a frontmatter record.
///
/// Every accessor returns `None` (or the default) on a bad value and records
/// why, so a validator can read all fields and report everything at once.
/// Null is a type error except for dates, where it means the field is unset.
pub(crate) struct Fields<'a> {
    record: &'a RawRecord,
    base: FieldPath,
    errors: ValidationError,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(record: &'a RawRecord) -> Self {
        Self::nested(record, FieldPath::root())
    }

    pub(crate) fn nested(record: &'a RawRecord, base: FieldPath) -> Self {
        Self {
            record,
            base,
            errors: ValidationError::new(),
        }
    }

    pub(crate) fn path(&self, name: &str) -> FieldPath {
        self.base.key(name)
    }

    fn get(&self, name: &str) -> Option<&'a JsonValue> {
        self.record.get(name)
    }

    /// Date fields take null as "not set"; every other reader rejects it.
    fn get_date(&self, name: &str) -> Option<&'a JsonValue> {
        self.get(name).filter(|value| !value.is_null())
    }

    fn type_error(&mut self, name: &str, expected: &'static str, found: &JsonValue) {
        let path = self.path(name);
        self.errors.push(
            path,
            ViolationKind::InvalidType {
                expected,
                received: json_type_name(found),
            },
        );
    }

    pub(crate) fn push(&mut self, path: FieldPath, kind: ViolationKind) {
        self.errors.push(path, kind);
    }

    pub(crate) fn required_string(&mut self, name: &str, max: Option<usize>) -> Option<String> {
        if self.get(name).is_none() {
            let path = self.path(name);
            self.errors.push(path, ViolationKind::Required);
            return None;
        }
        self.optional_string(name, max)
    }

    pub(crate) fn optional_string(&mut self, name: &str, max: Option<usize>) -> Option<String> {
        let value = self.get(name)?;
        let Some(s) = value.as_str() else {
            self.type_error(name, "string", value);
            return None;
        };
        if let Some(max) = max.filter(|&max| utf16_len(s) > max) {
            let path = self.path(name);
            self.errors.push(path, ViolationKind::TooLong { max });
            return None;
        }
        Some(s.to_string())
    }

    pub(crate) fn optional_bool(&mut self, name: &str) -> Option<bool> {
        let value = self.get(name)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.type_error(name, "boolean", value);
                None
            }
        }
    }

    pub(crate) fn bool_or(&mut self, name: &str, default: bool) -> bool {
        self.optional_bool(name).unwrap_or(default)
    }

    pub(crate) fn optional_number(&mut self, name: &str) -> Option<f64> {
        let value = self.get(name)?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.type_error(name, "number", value);
                None
            }
        }
    }

    pub(crate) fn number_or(&mut self, name: &str, default: f64) -> f64 {
        self.optional_number(name).unwrap_or(default)
    }

    pub(crate) fn required_date(&mut self, name: &str) -> Option<DateTime<Utc>> {
        if self.get_date(name).is_none() {
            let path = self.path(name);
            self.errors.push(path, ViolationKind::Required);
            return None;
        }
        self.optional_date(name)
    }

    pub(crate) fn optional_date(&mut self, name: &str) -> Option<DateTime<Utc>> {
        let value = self.get_date(name)?;
        let resolved = DateInput::Raw(value.clone()).resolve();
        if resolved.is_none() {
            let path = self.path(name);
            self.errors.push(path, ViolationKind::InvalidDate);
        }
        resolved
    }

    pub(crate) fn optional_object(&mut self, name: &str) -> Option<&'a RawRecord> {
        let value = self.get(name)?;
        match value.as_object() {
            Some(object) => Some(object),
            None => {
                self.type_error(name, "object", value);
                None
            }
        }
    }

    /// Reads a string array and canonicalizes it. Absent means empty.
    pub(crate) fn tags(&mut self, name: &str) -> Vec<String> {
        let Some(value) = self.get(name) else {
            return Vec::new();
        };
        let Some(items) = value.as_array() else {
            self.type_error(name, "array", value);
            return Vec::new();
        };

        let mut strings = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => strings.push(s),
                None => {
                    let path = self.path(name).index(index);
                    self.errors.push(
                        path,
                        ViolationKind::InvalidType {
                            expected: "string",
                            received: json_type_name(item),
                        },
                    );
                }
            }
        }
        canonicalize_tags(strings)
    }

    /// Logs keys the schema does not know about; they are dropped from the entry.
    pub(crate) fn note_unknown(&self, known: &[&str]) {
        for key in self.record.keys() {
            if !known.contains(&key.as_str()) {
                log::debug!("ignoring unknown frontmatter field `{}`", self.path(key));
            }
        }
    }

    pub(crate) fn into_errors(self) -> ValidationError {
        self.errors
    }
}
