use chrono::{DateTime, Utc};
use quire_core::{FieldPath, RawRecord, ValidationError, ViolationKind};
use serde::Serialize;

use super::fields::Fields;
use super::{DESCRIPTION_MAX_LEN, TITLE_MAX_LEN, ValidationContext};

const BLOG_FIELDS: &[&str] = &[
    "title",
    "description",
    "publishDate",
    "updatedDate",
    "heroImage",
    "tags",
    "language",
    "draft",
    "comment",
    "slug",
];

const HERO_IMAGE_FIELDS: &[&str] = &["src", "alt", "inferSize", "width", "height", "color"];

/// Cover image of a blog post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroImage {
    /// Reference as written in the frontmatter.
    pub src: String,
    /// Resolved file, when the resolver located one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<std::path::PathBuf>,
    /// Alternative text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Let the image pipeline read dimensions from the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infer_size: Option<bool>,
    /// Explicit width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Explicit height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Placeholder color shown while loading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A validated blog post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    /// At most 60 characters.
    pub title: String,
    /// At most 160 characters.
    pub description: String,
    /// First publication.
    pub publish_date: DateTime<Utc>,
    /// Last significant edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    /// Cover image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<HeroImage>,
    /// Lowercased, without case-insensitive duplicates, first occurrence first.
    pub tags: Vec<String>,
    /// Content language, e.g. `en`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Drafts are excluded from published listings.
    pub draft: bool,
    /// Whether comments are enabled for the post.
    pub comment: bool,
}

/// Validates a blog frontmatter record.
pub fn validate_blog(
    record: &RawRecord,
    ctx: &ValidationContext<'_>,
) -> Result<BlogEntry, ValidationError> {
    let mut fields = Fields::new(record);
    fields.note_unknown(BLOG_FIELDS);

    let title = fields.required_string("title", Some(TITLE_MAX_LEN));
    let description = fields.required_string("description", Some(DESCRIPTION_MAX_LEN));
    let publish_date = fields.required_date("publishDate");
    let updated_date = fields.optional_date("updatedDate");

    let hero_path = fields.path("heroImage");
    let hero_image = match fields.optional_object("heroImage") {
        Some(object) => {
            let (image, errors) = hero_image(object, hero_path, ctx);
            for violation in errors {
                fields.push(violation.path, violation.kind);
            }
            image
        }
        None => None,
    };

    let tags = fields.tags("tags");
    let language = fields.optional_string("language", None);
    let draft = fields.bool_or("draft", false);
    let comment = fields.bool_or("comment", true);

    let errors = fields.into_errors();
    match (title, description, publish_date) {
        (Some(title), Some(description), Some(publish_date)) => errors.finish(BlogEntry {
            title,
            description,
            publish_date,
            updated_date,
            hero_image,
            tags,
            language,
            draft,
            comment,
        }),
        _ => Err(errors),
    }
}

fn hero_image(
    object: &RawRecord,
    base: FieldPath,
    ctx: &ValidationContext<'_>,
) -> (Option<HeroImage>, ValidationError) {
    let mut fields = Fields::nested(object, base);
    fields.note_unknown(HERO_IMAGE_FIELDS);

    let src = fields.required_string("src", None);
    let resolved = src.as_deref().and_then(|src| {
        match ctx.images.resolve(src, ctx.file) {
            Ok(resolved) => Some(resolved),
            Err(err) => {
                let path = fields.path("src");
                fields.push(path, ViolationKind::InvalidImage(err.to_string()));
                None
            }
        }
    });

    let alt = fields.optional_string("alt", None);
    let infer_size = fields.optional_bool("inferSize");
    let width = fields.optional_number("width");
    let height = fields.optional_number("height");
    let color = fields.optional_string("color", None);

    let image = resolved.map(|resolved| HeroImage {
        src: resolved.src,
        path: resolved.path,
        alt,
        infer_size,
        width,
        height,
        color,
    });
    (image, fields.into_errors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RelativeImageResolver;
    use serde_json::{Value as JsonValue, json};
    use std::path::Path;

    fn record(value: JsonValue) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    fn validate(value: JsonValue) -> Result<BlogEntry, ValidationError> {
        validate_blog(&record(value), &ValidationContext::default())
    }

    fn minimal() -> JsonValue {
        json!({
            "title": "Hello",
            "description": "A first post",
            "publishDate": "01/19/2026",
        })
    }

    #[test]
    fn applies_defaults() {
        let entry = validate(minimal()).unwrap();
        assert_eq!(entry.publish_date.to_rfc3339(), "2026-01-19T00:00:00+00:00");
        assert!(entry.tags.is_empty());
        assert!(!entry.draft);
        assert!(entry.comment);
        assert_eq!(entry.updated_date, None);
        assert_eq!(entry.hero_image, None);
        assert_eq!(entry.language, None);
    }

    #[test]
    fn missing_title_is_reported() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("title");
        let err = validate(value).unwrap_err();
        assert!(err.has_field("title"));
        assert_eq!(err.violations()[0].kind, ViolationKind::Required);
    }

    #[test]
    fn null_flags_are_type_errors() {
        let mut value = minimal();
        value["draft"] = JsonValue::Null;
        value["comment"] = JsonValue::Null;
        value["updatedDate"] = JsonValue::Null;
        let err = validate(value).unwrap_err();
        let paths: Vec<String> = err.violations().iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, vec!["draft", "comment"]);
        assert!(err.violations().iter().all(|v| matches!(
            v.kind,
            ViolationKind::InvalidType { received: "null", .. }
        )));
    }

    #[test]
    fn title_of_61_chars_is_too_long() {
        let mut value = minimal();
        value["title"] = json!("x".repeat(61));
        let err = validate(value).unwrap_err();
        assert!(err.has_field("title"));
        assert_eq!(err.violations()[0].kind, ViolationKind::TooLong { max: 60 });

        let mut value = minimal();
        value["title"] = json!("x".repeat(60));
        assert!(validate(value).is_ok());
    }

    #[test]
    fn description_limit_is_160() {
        let mut value = minimal();
        value["description"] = json!("d".repeat(161));
        assert!(validate(value).unwrap_err().has_field("description"));
    }

    #[test]
    fn publish_date_is_required_and_must_parse() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("publishDate");
        assert!(validate(value).unwrap_err().has_field("publishDate"));

        let mut value = minimal();
        value["publishDate"] = json!("2026-02-30");
        let err = validate(value).unwrap_err();
        assert_eq!(err.violations()[0].kind, ViolationKind::InvalidDate);
    }

    #[test]
    fn collects_every_violation_in_field_order() {
        let err = validate(json!({
            "title": 7,
            "publishDate": "whenever",
            "tags": "rust",
            "draft": "yes",
            "comment": 0,
        }))
        .unwrap_err();

        insta::assert_snapshot!(err.to_string(), @r"
        frontmatter does not match the collection schema (6 violation(s))
          - title: Expected string, received number
          - description: Required
          - publishDate: Invalid date
          - tags: Expected array, received string
          - draft: Expected boolean, received string
          - comment: Expected boolean, received number
        ");
    }

    #[test]
    fn tags_are_canonicalized() {
        let mut value = minimal();
        value["tags"] = json!(["Go", "go", "RUST"]);
        assert_eq!(validate(value).unwrap().tags, vec!["go", "rust"]);
    }

    #[test]
    fn hero_image_fields_are_validated() {
        let mut value = minimal();
        value["heroImage"] = json!({"alt": 3, "width": "wide"});
        let err = validate(value).unwrap_err();
        let paths: Vec<String> = err.violations().iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, vec!["heroImage.src", "heroImage.alt", "heroImage.width"]);
    }

    #[test]
    fn hero_image_goes_through_resolver() {
        let resolver = RelativeImageResolver::new();
        let ctx = ValidationContext::default()
            .with_file(Path::new("/site/src/content/blog/post.md"))
            .with_images(&resolver);

        let mut value = minimal();
        value["heroImage"] = json!({"src": "./cover.png", "alt": "Cover", "inferSize": true});
        let entry = validate_blog(&record(value), &ctx).unwrap();
        let image = entry.hero_image.unwrap();
        assert_eq!(image.src, "./cover.png");
        assert_eq!(
            image.path.as_deref(),
            Some(Path::new("/site/src/content/blog/cover.png"))
        );
        assert_eq!(image.infer_size, Some(true));

        let mut value = minimal();
        value["heroImage"] = json!({"src": "https://example.com/a.png"});
        let err = validate_blog(&record(value), &ctx).unwrap_err();
        assert!(matches!(
            err.violations()[0].kind,
            ViolationKind::InvalidImage(_)
        ));
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let mut value = minimal();
        value["author"] = json!("someone");
        assert!(validate(value).is_ok());
    }
}
