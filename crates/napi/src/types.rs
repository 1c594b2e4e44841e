//! NAPI-exposed data structures.

use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Parsed frontmatter document plus any parser errors.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct FrontmatterResult {
    /// Structured frontmatter data represented as JSON.
    pub frontmatter: JsonValue,
    /// `"yaml"`, `"toml"`, or absent when the file has no frontmatter block.
    pub format: Option<String>,
    /// Content after the frontmatter block.
    pub body: String,
    /// Any syntax or parsing errors surfaced by the extractor.
    pub errors: Vec<String>,
}

/// A single rejected field.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted field path (`heroImage.src`, `tags[1]`), or `(root)`.
    pub path: String,
    /// Human readable message.
    pub message: String,
}

/// Options for `validateEntry`.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Collection registry (JSON). Defaults to the built-in blog/docs site.
    pub registry: Option<JsonValue>,
    /// Path of the content file, used to resolve relative hero images.
    pub file: Option<String>,
    /// Directory `/`-rooted hero images resolve against.
    pub public_dir: Option<String>,
    /// Rejects hero images whose file is missing. Defaults to false.
    pub check_images: Option<bool>,
}

/// Outcome of validating one record.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ValidateResult {
    /// Validated entry data (present on success).
    pub entry: Option<JsonValue>,
    /// Every violated field (empty on success).
    pub errors: Vec<FieldIssue>,
}
