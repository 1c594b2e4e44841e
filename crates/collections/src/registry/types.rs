//! Registry type definitions for content collections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::defaults::DEFAULT_PATTERN;
use crate::schema::{SchemaKind, Validator};

/// Where a collection's files live and which of them belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobLoaderConfig {
    /// Directory, relative to the project root, that entries are read from.
    pub base: PathBuf,
    /// Glob matched against paths relative to `base` (e.g. `**/*.{md,mdx}`).
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl GlobLoaderConfig {
    /// Loader for `base` using the default markdown pattern.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            pattern: default_pattern(),
        }
    }

    /// Overrides the glob pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }
}

/// A single collection definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionConfig {
    /// File discovery settings.
    pub loader: GlobLoaderConfig,
    /// Schema every entry must satisfy.
    pub schema: SchemaKind,
}

impl CollectionConfig {
    /// Returns the validator for this collection's schema.
    pub fn validator(&self) -> Validator {
        self.schema.validator()
    }
}

/// Named collections of a site, built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRegistry {
    /// Collection definitions keyed by name.
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionConfig>,
    /// Directory `/`-rooted image references resolve against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PathBuf>,
}

impl CollectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a registry from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds (or replaces) a collection.
    pub fn with_collection(mut self, name: impl Into<String>, config: CollectionConfig) -> Self {
        self.collections.insert(name.into(), config);
        self
    }

    /// Sets the public directory.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    /// Looks up a collection by name.
    pub fn get(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections.get(name)
    }

    /// Check if a collection is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Registered collection names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Get the validator for a collection.
    pub fn validator(&self, name: &str) -> Option<Validator> {
        self.get(name).map(CollectionConfig::validator)
    }
}
