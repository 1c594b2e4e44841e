use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::value::RawRecord;

/// Syntax of a frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontmatterFormat {
    /// YAML fenced by `---`.
    Yaml,
    /// TOML fenced by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Lowercase name, `yaml` or `toml`.
    pub fn as_str(self) -> &'static str {
        match self {
            FrontmatterFormat::Yaml => "yaml",
            FrontmatterFormat::Toml => "toml",
        }
    }

    fn fence(self) -> &'static str {
        match self {
            FrontmatterFormat::Yaml => "---",
            FrontmatterFormat::Toml => "+++",
        }
    }

    fn from_fence(line: &str) -> Option<Self> {
        match line.trim_end_matches('\r') {
            "---" => Some(FrontmatterFormat::Yaml),
            "+++" => Some(FrontmatterFormat::Toml),
            _ => None,
        }
    }
}

impl std::fmt::Display for FrontmatterFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content file split into its frontmatter record and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    /// Parsed key/value pairs. Empty when the file has no frontmatter.
    pub record: RawRecord,
    /// Format of the block, if one was present.
    pub format: Option<FrontmatterFormat>,
    /// Byte offset inside the original document where the body begins.
    pub body_start: usize,
}

impl Frontmatter {
    fn empty() -> Self {
        Self {
            record: RawRecord::new(),
            format: None,
            body_start: 0,
        }
    }

    /// Returns the body of `source`, the document this frontmatter was extracted from.
    pub fn body<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.body_start..).unwrap_or_default()
    }
}

/// Errors emitted while locating or parsing frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Opening fence without a matching closing fence.
    #[error("Unterminated frontmatter block: expected closing '{fence}'")]
    Unterminated {
        /// The fence that was never closed.
        fence: &'static str,
    },
    /// YAML failed to parse.
    #[error("YAML frontmatter parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML failed to parse.
    #[error("TOML frontmatter parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// The block parsed but could not be represented as JSON.
    #[error("Frontmatter conversion error: {0}")]
    Convert(#[from] serde_json::Error),
    /// Top-level node was not a mapping.
    #[error("Frontmatter must be a mapping at the top level")]
    InvalidRootType,
}

/// Extracts YAML (`---`) or TOML (`+++`) frontmatter from a content file.
///
/// A leading BOM and blank lines before the opening fence are skipped. A file
/// whose first non-blank line is not a fence has no frontmatter.
pub fn extract_frontmatter(input: &str) -> Result<Frontmatter, FrontmatterError> {
    match find_block(input)? {
        Some(block) => {
            let record = parse_block(block.format, block.content)?;
            Ok(Frontmatter {
                record,
                format: Some(block.format),
                body_start: block.body_start,
            })
        }
        None => Ok(Frontmatter::empty()),
    }
}

struct RawBlock<'a> {
    format: FrontmatterFormat,
    content: &'a str,
    body_start: usize,
}

fn parse_block(format: FrontmatterFormat, block: &str) -> Result<RawRecord, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(RawRecord::new());
    }

    let value = match format {
        FrontmatterFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(block)?;
            serde_json::to_value(yaml)?
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table = toml::from_str(block)?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    match value {
        JsonValue::Null => Ok(RawRecord::new()),
        JsonValue::Object(record) => Ok(record),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

/// TOML datetimes become their string form so date fields see the same shape as YAML.
fn toml_to_json(value: toml::Value) -> JsonValue {
    match value {
        toml::Value::String(s) => JsonValue::String(s),
        toml::Value::Integer(i) => JsonValue::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        toml::Value::Boolean(b) => JsonValue::Bool(b),
        toml::Value::Datetime(dt) => JsonValue::String(dt.to_string()),
        toml::Value::Array(items) => JsonValue::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => JsonValue::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

fn find_block(input: &str) -> Result<Option<RawBlock<'_>>, FrontmatterError> {
    let (content, bom_len) = strip_bom(input);
    let mut cursor = 0usize;

    while let Some((line, next)) = next_line(content, cursor) {
        if line.trim().is_empty() {
            cursor = next;
            continue;
        }

        let Some(format) = FrontmatterFormat::from_fence(line) else {
            return Ok(None);
        };

        let block_start = next;
        let mut scan = next;
        while let Some((block_line, after)) = next_line(content, scan) {
            if FrontmatterFormat::from_fence(block_line) == Some(format) {
                let raw = &content[block_start..scan];
                return Ok(Some(RawBlock {
                    format,
                    content: raw.trim_end_matches(['\r', '\n']),
                    body_start: bom_len + after,
                }));
            }
            scan = after;
        }

        return Err(FrontmatterError::Unterminated {
            fence: format.fence(),
        });
    }

    Ok(None)
}

fn strip_bom(input: &str) -> (&str, usize) {
    match input.strip_prefix('\u{feff}') {
        Some(stripped) => (stripped, '\u{feff}'.len_utf8()),
        None => (input, 0),
    }
}

fn next_line(input: &str, start: usize) -> Option<(&str, usize)> {
    if start >= input.len() {
        return None;
    }

    match input[start..].find('\n') {
        Some(pos) => Some((&input[start..start + pos], start + pos + 1)),
        None => Some((&input[start..], input.len())),
    }
}
