//! Default registry configuration.
//!
//! The stock site layout has a `blog` collection under `src/content/blog` and
//! a `docs` collection under `src/content/docs`, both reading markdown and MDX
//! files, with public assets in `public/`.

use super::types::{CollectionConfig, CollectionRegistry, GlobLoaderConfig};
use crate::schema::SchemaKind;

/// Glob used when a loader does not name one.
pub const DEFAULT_PATTERN: &str = "**/*.{md,mdx}";

/// Creates the default registry with the `blog` and `docs` collections.
///
/// # Example
///
/// ```
/// use quire_collections::registry::defaults::default_site_registry;
/// use quire_collections::SchemaKind;
///
/// let registry = default_site_registry();
/// assert_eq!(registry.get("blog").map(|c| c.schema), Some(SchemaKind::Blog));
/// assert_eq!(registry.names().collect::<Vec<_>>(), vec!["blog", "docs"]);
/// ```
pub fn default_site_registry() -> CollectionRegistry {
    CollectionRegistry::new()
        .with_collection(
            "blog",
            CollectionConfig {
                loader: GlobLoaderConfig::new("src/content/blog"),
                schema: SchemaKind::Blog,
            },
        )
        .with_collection(
            "docs",
            CollectionConfig {
                loader: GlobLoaderConfig::new("src/content/docs"),
                schema: SchemaKind::Docs,
            },
        )
        .with_public_dir("public")
}
