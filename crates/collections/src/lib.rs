#![deny(missing_docs)]
//! quire collections: blog/docs schemas, the collection registry, and the glob loader.

/// Loaded collections and listing queries.
pub mod collection;
/// Entry and load errors.
pub mod error;
/// Hero image resolution.
pub mod image;
/// File discovery and entry loading.
pub mod loader;
/// Collection registry and its defaults.
pub mod registry;
/// Collection schemas and validators.
pub mod schema;

pub use collection::{Collection, CollectionEntry, TagCount};
pub use error::{EntryError, LoadError};
pub use image::{
    ImageError, ImageResolver, PassthroughImageResolver, RelativeImageResolver, ResolvedImage,
};
pub use loader::{DuplicateIds, GlobPattern, Loader, assemble, discover_files};
pub use registry::{
    CollectionConfig, CollectionRegistry, DEFAULT_PATTERN, GlobLoaderConfig, default_site_registry,
};
pub use schema::{
    BlogEntry, DocEntry, EntryData, HeroImage, SchemaKind, ValidationContext, Validator,
    validate_blog, validate_docs,
};
