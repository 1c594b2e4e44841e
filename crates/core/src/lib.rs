#![deny(missing_docs)]
//! quire core: date normalization, tag canonicalization, frontmatter extraction, and entry ids.

/// Date normalization and coercion.
pub mod date;
/// Validation error and field path types.
pub mod error;
/// YAML/TOML frontmatter extraction.
pub mod frontmatter;
/// Entry id derivation from file paths.
pub mod slug;
/// Tag canonicalization.
pub mod tags;
/// Loose record helpers.
pub mod value;

pub use date::{DateInput, coerce_date, normalize_date_input, normalize_date_str, parse_date_str};
pub use error::{FieldPath, ValidationError, Violation, ViolationKind};
pub use frontmatter::{Frontmatter, FrontmatterError, FrontmatterFormat, extract_frontmatter};
pub use slug::{entry_id_from_path, entry_id_from_slug, slugify_segment};
pub use tags::{canonicalize_tags, is_canonical};
pub use value::{RawRecord, json_type_name, utf16_len};
