//! Discovers content files and turns them into validated entries.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use quire_core::{entry_id_from_path, entry_id_from_slug, extract_frontmatter};
use walkdir::WalkDir;

use crate::collection::{Collection, CollectionEntry};
use crate::error::{EntryError, LoadError};
use crate::image::{ImageResolver, RelativeImageResolver};
use crate::registry::{CollectionConfig, CollectionRegistry, GlobLoaderConfig};
use crate::schema::ValidationContext;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A compiled loader pattern. `{a,b}` groups expand into alternatives.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    alternatives: Vec<Pattern>,
}

impl GlobPattern {
    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> Result<Self, LoadError> {
        let alternatives = expand_braces(pattern)
            .iter()
            .map(|alt| Pattern::new(alt))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| LoadError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_string(),
            alternatives,
        })
    }

    /// Pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests a path relative to the collection base.
    pub fn matches(&self, relative: &Path) -> bool {
        self.alternatives
            .iter()
            .any(|pattern| pattern.matches_path_with(relative, MATCH_OPTIONS))
    }
}

/// Expands `{a,b}` groups left to right. Unbalanced braces stay literal.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[open..].find('}').map(|i| open + i) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    pattern[open + 1..close]
        .split(',')
        .flat_map(|alt| expand_braces(&format!("{prefix}{alt}{suffix}")))
        .collect()
}

/// Loads collections of a registry from a project directory.
pub struct Loader<'a> {
    root: PathBuf,
    registry: &'a CollectionRegistry,
    images: Box<dyn ImageResolver>,
}

impl<'a> Loader<'a> {
    /// Creates a loader for the project at `root`.
    ///
    /// Hero images are resolved next to their entry (or under the registry's
    /// public directory) and must exist on disk.
    pub fn new(root: impl Into<PathBuf>, registry: &'a CollectionRegistry) -> Self {
        let root = root.into();
        let mut images = RelativeImageResolver::new().require_exists(true);
        if let Some(public) = &registry.public_dir {
            images = images.with_public_dir(root.join(public));
        }
        Self {
            root,
            registry,
            images: Box::new(images),
        }
    }

    /// Replaces the image resolver.
    pub fn with_image_resolver(mut self, images: impl ImageResolver + 'static) -> Self {
        self.images = Box::new(images);
        self
    }

    /// Looks up a collection definition.
    pub fn collection(&self, name: &str) -> Result<&'a CollectionConfig, LoadError> {
        self.registry
            .get(name)
            .ok_or_else(|| LoadError::UnknownCollection(name.to_string()))
    }

    /// Lists the files of a collection, relative to its base, in path order.
    pub fn discover(&self, collection: &str) -> Result<Vec<PathBuf>, LoadError> {
        let config = self.collection(collection)?;
        discover_files(&self.root, &config.loader)
    }

    /// Reads and validates one file of a collection.
    ///
    /// `relative` is relative to the collection base, as returned by [`Loader::discover`].
    pub fn load_entry(
        &self,
        collection: &str,
        config: &CollectionConfig,
        relative: &Path,
    ) -> Result<CollectionEntry, EntryError> {
        let path = self.root.join(&config.loader.base).join(relative);

        let source = fs::read_to_string(&path).map_err(|source| EntryError::Io {
            path: path.clone(),
            source,
        })?;
        let frontmatter =
            extract_frontmatter(&source).map_err(|source| EntryError::Frontmatter {
                path: path.clone(),
                source,
            })?;

        let id = frontmatter
            .record
            .get("slug")
            .and_then(|slug| slug.as_str())
            .and_then(entry_id_from_slug)
            .unwrap_or_else(|| entry_id_from_path(relative));

        let ctx = ValidationContext::default()
            .with_file(&path)
            .with_images(self.images.as_ref());
        let data = config
            .schema
            .validate(&frontmatter.record, &ctx)
            .map_err(|source| EntryError::Validation {
                path: path.clone(),
                source,
            })?;

        log::debug!("loaded {collection} entry `{id}` from {}", path.display());
        Ok(CollectionEntry {
            id,
            collection: collection.to_string(),
            file: Some(path),
            body: frontmatter.body(&source).to_string(),
            data,
        })
    }

    /// Loads every file of a collection.
    ///
    /// All broken files are reported together in [`LoadError::Entries`].
    pub fn load(&self, collection: &str) -> Result<Collection, LoadError> {
        let config = self.collection(collection)?;
        let files = discover_files(&self.root, &config.loader)?;
        let results = files
            .iter()
            .map(|relative| self.load_entry(collection, config, relative))
            .collect();
        assemble(collection, config, results)
    }

    /// Loads every registered collection, in name order.
    pub fn load_all(&self) -> Result<Vec<Collection>, LoadError> {
        self.registry.names().map(|name| self.load(name)).collect()
    }
}

/// Tracks entry ids of one collection in discovery order.
#[derive(Debug, Default)]
pub struct DuplicateIds {
    seen: HashMap<String, PathBuf>,
}

impl DuplicateIds {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the entry's id, or rejects the entry if an earlier file already holds it.
    pub fn check(&mut self, entry: CollectionEntry) -> Result<CollectionEntry, EntryError> {
        let file = entry.file.clone().unwrap_or_default();
        if let Some(first) = self.seen.get(&entry.id) {
            return Err(EntryError::DuplicateId {
                path: file,
                id: entry.id,
                first: first.clone(),
            });
        }
        self.seen.insert(entry.id.clone(), file);
        Ok(entry)
    }
}

/// Builds a collection from per-file results, checking id uniqueness.
///
/// Results must be in discovery order so duplicate ids blame the later file.
pub fn assemble(
    collection: &str,
    config: &CollectionConfig,
    results: Vec<Result<CollectionEntry, EntryError>>,
) -> Result<Collection, LoadError> {
    let mut entries = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    let mut ids = DuplicateIds::new();

    for result in results {
        match result.and_then(|entry| ids.check(entry)) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                log::warn!("rejected {collection} entry: {err}");
                failures.push(err);
            }
        }
    }

    if !failures.is_empty() {
        return Err(LoadError::Entries {
            collection: collection.to_string(),
            failures,
        });
    }

    log::debug!("loaded {} {collection} entries", entries.len());
    Ok(Collection::new(collection, config.schema, entries))
}

/// Lists files under `root/base` matching the loader pattern, relative to the base.
pub fn discover_files(root: &Path, loader: &GlobLoaderConfig) -> Result<Vec<PathBuf>, LoadError> {
    let pattern = GlobPattern::new(&loader.pattern)?;
    let base = root.join(&loader.base);
    if !base.is_dir() {
        log::warn!("collection directory {} does not exist", base.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&base).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk {
            base: base.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&base) else {
            continue;
        };
        if pattern.matches(relative) {
            files.push(relative.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
