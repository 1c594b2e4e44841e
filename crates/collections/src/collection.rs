//! Loaded collections and the queries pages run against them.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::schema::{EntryData, SchemaKind};

/// One validated content file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    /// Unique id within the collection (path-derived or the `slug` field).
    pub id: String,
    /// Name of the owning collection.
    pub collection: String,
    /// Source file, when loaded from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Content after the frontmatter block.
    pub body: String,
    /// Validated frontmatter.
    pub data: EntryData,
}

/// A tag and the number of entries carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    /// Canonical tag.
    pub tag: String,
    /// Number of entries tagged with it.
    pub count: usize,
}

/// All entries of one collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    name: String,
    schema: SchemaKind,
    entries: Vec<CollectionEntry>,
}

impl Collection {
    /// Wraps already validated entries.
    pub fn new(name: impl Into<String>, schema: SchemaKind, entries: Vec<CollectionEntry>) -> Self {
        Self {
            name: name.into(),
            schema,
            entries,
        }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema of the entries.
    pub fn schema(&self) -> SchemaKind {
        self.schema
    }

    /// Entries in discovery order.
    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    /// Number of entries, drafts included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CollectionEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries that are not drafts.
    pub fn published(&self) -> impl Iterator<Item = &CollectionEntry> {
        self.entries.iter().filter(|entry| !entry.data.draft())
    }

    /// Published entries in listing order.
    ///
    /// Blog posts come newest first; docs pages by ascending `order`, then
    /// title. Remaining ties fall back to the id.
    pub fn sorted(&self) -> Vec<&CollectionEntry> {
        let mut entries: Vec<_> = self.published().collect();
        match self.schema {
            SchemaKind::Blog => entries.sort_by(|a, b| {
                b.data
                    .publish_date()
                    .cmp(&a.data.publish_date())
                    .then_with(|| a.id.cmp(&b.id))
            }),
            SchemaKind::Docs => entries.sort_by(|a, b| {
                doc_order(&a.data)
                    .total_cmp(&doc_order(&b.data))
                    .then_with(|| a.data.title().cmp(b.data.title()))
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }
        entries
    }

    /// Tags of published entries with their counts, most used first.
    pub fn tag_counts(&self) -> Vec<TagCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in self.published() {
            for tag in entry.data.tags() {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        tags.sort_by(|a, b| match b.count.cmp(&a.count) {
            Ordering::Equal => a.tag.cmp(&b.tag),
            other => other,
        });
        tags
    }

    /// Published entries carrying `tag` (compared canonically).
    pub fn with_tag<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a CollectionEntry> + 'a {
        let tag = tag.to_lowercase();
        self.published()
            .filter(move |entry| entry.data.tags().iter().any(|t| *t == tag))
    }
}

fn doc_order(data: &EntryData) -> f64 {
    data.as_docs()
        .map(|docs| docs.order)
        .unwrap_or(crate::schema::DEFAULT_DOC_ORDER)
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a CollectionEntry;
    type IntoIter = std::slice::Iter<'a, CollectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValidationContext;
    use serde_json::{Value as JsonValue, json};

    fn entry(id: &str, schema: SchemaKind, data: JsonValue) -> CollectionEntry {
        let data = schema
            .validate_value(&data, &ValidationContext::default())
            .expect("valid fixture");
        CollectionEntry {
            id: id.to_string(),
            collection: "test".to_string(),
            file: None,
            body: String::new(),
            data,
        }
    }

    fn post(id: &str, date: &str, tags: JsonValue, draft: bool) -> CollectionEntry {
        entry(
            id,
            SchemaKind::Blog,
            json!({
                "title": id,
                "description": "d",
                "publishDate": date,
                "tags": tags,
                "draft": draft,
            }),
        )
    }

    fn page(id: &str, title: &str, order: Option<f64>) -> CollectionEntry {
        let mut data = json!({"title": title, "description": "d"});
        if let Some(order) = order {
            data["order"] = json!(order);
        }
        entry(id, SchemaKind::Docs, data)
    }

    fn blog() -> Collection {
        Collection::new(
            "blog",
            SchemaKind::Blog,
            vec![
                post("old", "2025-05-01", json!(["Rust", "web"]), false),
                post("new", "01/19/2026", json!(["rust"]), false),
                post("draft", "2026-02-01", json!(["Rust", "secret"]), true),
                post("mid", "2025/9/1", json!(["Astro", "web"]), false),
            ],
        )
    }

    #[test]
    fn published_skips_drafts() {
        let collection = blog();
        let ids: Vec<&str> = collection.published().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "new", "mid"]);
    }

    #[test]
    fn blog_sorts_newest_first() {
        let collection = blog();
        let ids: Vec<&str> = collection.sorted().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn docs_sort_by_order_then_title() {
        let collection = Collection::new(
            "docs",
            SchemaKind::Docs,
            vec![
                page("z", "Zeta", None),
                page("b", "Beta", Some(2.0)),
                page("a", "Alpha", None),
                page("c", "Gamma", Some(1.0)),
            ],
        );
        let ids: Vec<&str> = collection.sorted().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a", "z"]);
    }

    #[test]
    fn tag_counts_ignore_drafts() {
        let counts = blog().tag_counts();
        assert_eq!(
            counts,
            vec![
                TagCount {
                    tag: "rust".into(),
                    count: 2,
                },
                TagCount {
                    tag: "web".into(),
                    count: 2,
                },
                TagCount {
                    tag: "astro".into(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn with_tag_compares_canonically() {
        let collection = blog();
        let ids: Vec<&str> = collection.with_tag("RUST").map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "new"]);
    }

    #[test]
    fn get_finds_by_id() {
        let collection = blog();
        assert_eq!(collection.get("mid").map(|e| e.data.title()), Some("mid"));
        assert!(collection.get("missing").is_none());
        assert_eq!(collection.len(), 4);
    }
}
