//! Collection schemas and their validators.

mod blog;
mod docs;
mod fields;

use std::path::Path;

use chrono::{DateTime, Utc};
use quire_core::{FieldPath, RawRecord, ValidationError, ViolationKind, json_type_name};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::image::{ImageResolver, PassthroughImageResolver};

pub use blog::{BlogEntry, HeroImage, validate_blog};
pub use docs::{DEFAULT_DOC_ORDER, DocEntry, validate_docs};

/// Maximum `title` length, in UTF-16 code units.
pub const TITLE_MAX_LEN: usize = 60;
/// Maximum `description` length, in UTF-16 code units.
pub const DESCRIPTION_MAX_LEN: usize = 160;

/// Everything a validator may consult besides the record itself.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Content file the record came from, used to resolve relative images.
    pub file: Option<&'a Path>,
    /// Resolver for `heroImage.src`.
    pub images: &'a dyn ImageResolver,
}

impl<'a> ValidationContext<'a> {
    /// Sets the content file the record came from.
    pub fn with_file(mut self, file: &'a Path) -> Self {
        self.file = Some(file);
        self
    }

    /// Replaces the image resolver.
    pub fn with_images(mut self, images: &'a dyn ImageResolver) -> Self {
        self.images = images;
        self
    }
}

impl Default for ValidationContext<'_> {
    fn default() -> Self {
        Self {
            file: None,
            images: &PassthroughImageResolver,
        }
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

/// Signature shared by every collection validator.
pub type Validator = fn(&RawRecord, &ValidationContext<'_>) -> Result<EntryData, ValidationError>;

/// The shape a collection's entries must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Blog posts ([`BlogEntry`]).
    Blog,
    /// Documentation pages ([`DocEntry`]).
    Docs,
}

impl SchemaKind {
    /// Returns the validator for this schema.
    pub fn validator(self) -> Validator {
        match self {
            SchemaKind::Blog => blog_data,
            SchemaKind::Docs => docs_data,
        }
    }

    /// Validates a record against this schema.
    pub fn validate(
        self,
        record: &RawRecord,
        ctx: &ValidationContext<'_>,
    ) -> Result<EntryData, ValidationError> {
        (self.validator())(record, ctx)
    }

    /// Validates an arbitrary JSON value, which must be an object.
    pub fn validate_value(
        self,
        value: &JsonValue,
        ctx: &ValidationContext<'_>,
    ) -> Result<EntryData, ValidationError> {
        match value.as_object() {
            Some(record) => self.validate(record, ctx),
            None => {
                let mut errors = ValidationError::new();
                errors.push(
                    FieldPath::root(),
                    ViolationKind::InvalidType {
                        expected: "object",
                        received: json_type_name(value),
                    },
                );
                Err(errors)
            }
        }
    }
}

fn blog_data(
    record: &RawRecord,
    ctx: &ValidationContext<'_>,
) -> Result<EntryData, ValidationError> {
    validate_blog(record, ctx).map(EntryData::Blog)
}

fn docs_data(
    record: &RawRecord,
    ctx: &ValidationContext<'_>,
) -> Result<EntryData, ValidationError> {
    validate_docs(record, ctx).map(EntryData::Docs)
}

/// Validated frontmatter of one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntryData {
    /// A blog post.
    Blog(BlogEntry),
    /// A docs page.
    Docs(DocEntry),
}

impl EntryData {
    /// Schema the data was validated against.
    pub fn schema(&self) -> SchemaKind {
        match self {
            EntryData::Blog(_) => SchemaKind::Blog,
            EntryData::Docs(_) => SchemaKind::Docs,
        }
    }

    /// Entry title.
    pub fn title(&self) -> &str {
        match self {
            EntryData::Blog(entry) => &entry.title,
            EntryData::Docs(entry) => &entry.title,
        }
    }

    /// Entry description.
    pub fn description(&self) -> &str {
        match self {
            EntryData::Blog(entry) => &entry.description,
            EntryData::Docs(entry) => &entry.description,
        }
    }

    /// Canonical tags.
    pub fn tags(&self) -> &[String] {
        match self {
            EntryData::Blog(entry) => &entry.tags,
            EntryData::Docs(entry) => &entry.tags,
        }
    }

    /// Whether the entry is a draft.
    pub fn draft(&self) -> bool {
        match self {
            EntryData::Blog(entry) => entry.draft,
            EntryData::Docs(entry) => entry.draft,
        }
    }

    /// Publication date, if the entry has one.
    pub fn publish_date(&self) -> Option<DateTime<Utc>> {
        match self {
            EntryData::Blog(entry) => Some(entry.publish_date),
            EntryData::Docs(entry) => entry.publish_date,
        }
    }

    /// Last update date, if the entry has one.
    pub fn updated_date(&self) -> Option<DateTime<Utc>> {
        match self {
            EntryData::Blog(entry) => entry.updated_date,
            EntryData::Docs(entry) => entry.updated_date,
        }
    }

    /// Blog fields, for blog entries.
    pub fn as_blog(&self) -> Option<&BlogEntry> {
        match self {
            EntryData::Blog(entry) => Some(entry),
            EntryData::Docs(_) => None,
        }
    }

    /// Docs fields, for docs entries.
    pub fn as_docs(&self) -> Option<&DocEntry> {
        match self {
            EntryData::Docs(entry) => Some(entry),
            EntryData::Blog(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validator_dispatches_by_kind() {
        let record = json!({"title": "T", "description": "D"});
        let ctx = ValidationContext::default();

        let docs = SchemaKind::Docs.validate_value(&record, &ctx).unwrap();
        assert_eq!(docs.schema(), SchemaKind::Docs);
        assert_eq!(docs.as_docs().map(|d| d.order), Some(DEFAULT_DOC_ORDER));

        let blog = SchemaKind::Blog.validate_value(&record, &ctx).unwrap_err();
        assert!(blog.has_field("publishDate"));
    }

    #[test]
    fn non_object_records_fail_at_root() {
        let err = SchemaKind::Blog
            .validate_value(&json!(["title"]), &ValidationContext::default())
            .unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.violations()[0].path.is_root());
    }

    #[test]
    fn schema_kind_uses_lowercase_names() {
        assert_eq!(serde_json::to_value(SchemaKind::Docs).unwrap(), json!("docs"));
        let kind: SchemaKind = serde_json::from_value(json!("blog")).unwrap();
        assert_eq!(kind, SchemaKind::Blog);
    }

    #[test]
    fn validated_blog_round_trips() {
        let input = json!({
            "title": "Full post",
            "description": "Every field set",
            "publishDate": "2026-01-19",
            "updatedDate": "2026-02-01T08:00:00Z",
            "heroImage": {
                "src": "./cover.png",
                "alt": "Cover",
                "inferSize": false,
                "width": 1200,
                "height": 630,
                "color": "#112233"
            },
            "tags": ["Rust", "rust", "Astro"],
            "language": "en",
            "draft": true,
            "comment": false
        });
        let ctx = ValidationContext::default();

        let first = SchemaKind::Blog.validate_value(&input, &ctx).unwrap();
        let serialized = serde_json::to_value(&first).unwrap();

        assert_eq!(serialized["title"], input["title"]);
        assert_eq!(serialized["heroImage"]["alt"], input["heroImage"]["alt"]);
        assert_eq!(serialized["tags"], json!(["rust", "astro"]));
        assert_eq!(serialized["publishDate"], json!("2026-01-19T00:00:00Z"));
        assert_eq!(serialized["draft"], json!(true));
        assert_eq!(serialized["comment"], json!(false));

        let second = SchemaKind::Blog.validate_value(&serialized, &ctx).unwrap();
        assert_eq!(first, second);
    }
}
