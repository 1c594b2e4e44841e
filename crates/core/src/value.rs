use serde_json::Value as JsonValue;

/// A loose frontmatter record: the parsed key/value pairs before validation.
pub type RawRecord = serde_json::Map<String, JsonValue>;

/// Name of a JSON value's type, as reported in type mismatch violations.
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Length of a string in UTF-16 code units.
///
/// Length limits are checked the way the JavaScript side of the build counts
/// them, so an astral-plane character costs two.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
