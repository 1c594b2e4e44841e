use chrono::{DateTime, Utc};
use quire_core::{RawRecord, ValidationError};
use serde::Serialize;

use super::fields::Fields;
use super::{DESCRIPTION_MAX_LEN, TITLE_MAX_LEN, ValidationContext};

/// Position given to docs pages that do not set `order`.
pub const DEFAULT_DOC_ORDER: f64 = 999.0;

const DOC_FIELDS: &[&str] = &[
    "title",
    "description",
    "publishDate",
    "updatedDate",
    "tags",
    "draft",
    "order",
    "slug",
];

/// A validated documentation page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    /// At most 60 characters.
    pub title: String,
    /// At most 160 characters.
    pub description: String,
    /// First publication, if tracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,
    /// Last significant edit, if tracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    /// Lowercased, without case-insensitive duplicates, first occurrence first.
    pub tags: Vec<String>,
    /// Drafts are excluded from published listings.
    pub draft: bool,
    /// Sidebar position; lower comes first.
    pub order: f64,
}

/// Validates a docs frontmatter record.
pub fn validate_docs(
    record: &RawRecord,
    _ctx: &ValidationContext<'_>,
) -> Result<DocEntry, ValidationError> {
    let mut fields = Fields::new(record);
    fields.note_unknown(DOC_FIELDS);

    let title = fields.required_string("title", Some(TITLE_MAX_LEN));
    let description = fields.required_string("description", Some(DESCRIPTION_MAX_LEN));
    let publish_date = fields.optional_date("publishDate");
    let updated_date = fields.optional_date("updatedDate");
    let tags = fields.tags("tags");
    let draft = fields.bool_or("draft", false);
    let order = fields.number_or("order", DEFAULT_DOC_ORDER);

    let errors = fields.into_errors();
    match (title, description) {
        (Some(title), Some(description)) => errors.finish(DocEntry {
            title,
            description,
            publish_date,
            updated_date,
            tags,
            draft,
            order,
        }),
        _ => Err(errors),
    }
}
