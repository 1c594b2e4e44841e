#![deny(missing_docs)]
//! Node.js bindings that surface quire's Rust implementation.

use napi::bindgen_prelude::*;
use napi_derive::napi;
use quire_collections::{
    EntryData, ImageResolver, PassthroughImageResolver, RelativeImageResolver, ValidationContext,
};
use quire_core::{canonicalize_tags, extract_frontmatter, normalize_date_input};
use serde_json::Value as JsonValue;
use std::path::Path;

/// Batch loading types and functions.
pub mod batch;
mod convert;
/// NAPI-exposed data structures.
pub mod types;

pub use batch::*;
pub use types::*;
use convert::{registry_from_js, to_json, validation_issues};

/// Rewrites slash-separated date strings into ISO `YYYY-MM-DD`.
///
/// Anything else (ISO strings, numbers, unrecognized text) is returned as is.
#[napi(js_name = "normalizeDate")]
pub fn normalize_date(value: JsonValue) -> JsonValue {
    normalize_date_input(&value).into_owned()
}

/// Lower-cases tags and drops duplicates, keeping first occurrences.
#[napi(js_name = "canonicalizeTags")]
pub fn canonicalize_tags_napi(tags: Vec<String>) -> Vec<String> {
    canonicalize_tags(tags)
}

/// Extracts YAML or TOML frontmatter without validating it.
#[napi]
pub fn parse_frontmatter(content: String) -> napi::Result<FrontmatterResult> {
    match extract_frontmatter(&content) {
        Ok(frontmatter) => Ok(FrontmatterResult {
            body: frontmatter.body(&content).to_string(),
            format: frontmatter.format.map(|format| format.to_string()),
            frontmatter: JsonValue::Object(frontmatter.record),
            errors: Vec::new(),
        }),
        Err(err) => Ok(FrontmatterResult {
            frontmatter: JsonValue::Object(Default::default()),
            format: None,
            body: content,
            errors: vec![err.to_string()],
        }),
    }
}

/// Validates a frontmatter record against a collection's schema.
///
/// Every violated field is reported. Fails only when the collection is not
/// registered or the registry option is malformed.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { validateEntry } = require('quire-napi');
///
/// const { entry, errors } = validateEntry('blog', {
///   title: 'Hello',
///   description: 'First post',
///   publishDate: '1/19/2026',
///   tags: ['Rust', 'rust'],
/// });
/// // entry.publishDate === '2026-01-19T00:00:00Z', entry.tags = ['rust']
/// ```
#[napi(js_name = "validateEntry")]
pub fn validate_entry(
    collection: String,
    data: JsonValue,
    options: Option<ValidateOptions>,
) -> napi::Result<ValidateResult> {
    let opts = options.unwrap_or_default();
    let registry = registry_from_js(opts.registry)?;
    let config = registry
        .get(&collection)
        .ok_or_else(|| Error::from_reason(format!("unknown collection `{collection}`")))?;

    let relative = match &opts.file {
        Some(_) => {
            let mut resolver =
                RelativeImageResolver::new().require_exists(opts.check_images.unwrap_or(false));
            if let Some(public_dir) = &opts.public_dir {
                resolver = resolver.with_public_dir(public_dir);
            }
            Some(resolver)
        }
        None => None,
    };
    let images: &dyn ImageResolver = match &relative {
        Some(resolver) => resolver,
        None => &PassthroughImageResolver,
    };

    let mut ctx = ValidationContext::default().with_images(images);
    if let Some(file) = &opts.file {
        ctx = ctx.with_file(Path::new(file));
    }

    match config.schema.validate_value(&data, &ctx) {
        Ok(entry) => Ok(ValidateResult {
            entry: Some(to_json::<EntryData>(&entry)?),
            errors: Vec::new(),
        }),
        Err(err) => Ok(ValidateResult {
            entry: None,
            errors: validation_issues(&err),
        }),
    }
}

/// Loads every file of a collection in parallel using Rayon.
///
/// Files are discovered with the collection's glob loader under `root`.
/// Each file gets its own result, so one broken file does not hide the
/// others.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { loadCollection } = require('quire-napi');
///
/// const result = loadCollection(process.cwd(), 'blog', { maxThreads: 4 });
/// console.log(`Loaded ${result.stats.succeeded}/${result.stats.total} in ${result.stats.processingTimeMs}ms`);
/// ```
#[napi(js_name = "loadCollection")]
pub fn load_collection_napi(
    root: String,
    collection: String,
    options: Option<LoadOptions>,
) -> napi::Result<CollectionLoadResult> {
    let mut opts = options.unwrap_or_default();
    let registry = registry_from_js(opts.registry.take())?;
    batch::load_collection(root, collection, &registry, opts)
}
