use std::path::{Path, PathBuf};

use quire_core::{FrontmatterError, ValidationError};
use thiserror::Error;

/// Why a single content file could not become an entry.
#[derive(Debug, Error)]
pub enum EntryError {
    /// The file could not be read.
    #[error("{}: failed to read file: {}", .path.display(), .source)]
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The frontmatter block is malformed.
    #[error("{}: {}", .path.display(), .source)]
    Frontmatter {
        /// Offending file.
        path: PathBuf,
        /// Extraction error.
        source: FrontmatterError,
    },
    /// The frontmatter does not satisfy the collection schema.
    #[error("{}: {}", .path.display(), .source)]
    Validation {
        /// Offending file.
        path: PathBuf,
        /// Every violated field.
        source: ValidationError,
    },
    /// Another file of the same collection already produced this id.
    #[error("{}: duplicate entry id `{}` (already used by {})", .path.display(), .id, .first.display())]
    DuplicateId {
        /// Offending file.
        path: PathBuf,
        /// The clashing id.
        id: String,
        /// File that claimed the id first.
        first: PathBuf,
    },
}

impl EntryError {
    /// File the error is about.
    pub fn path(&self) -> &Path {
        match self {
            EntryError::Io { path, .. }
            | EntryError::Frontmatter { path, .. }
            | EntryError::Validation { path, .. }
            | EntryError::DuplicateId { path, .. } => path,
        }
    }

    /// Schema violations, when this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            EntryError::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that stop a whole collection from loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The registry has no collection with this name.
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),
    /// The loader's glob pattern does not compile.
    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        /// Pattern as configured.
        pattern: String,
        /// Compile error.
        source: glob::PatternError,
    },
    /// Directory traversal failed.
    #[error("failed to scan {}: {}", .base.display(), .source)]
    Walk {
        /// Directory being scanned.
        base: PathBuf,
        /// Traversal error.
        source: walkdir::Error,
    },
    /// One or more files were rejected; every failure is listed.
    #[error("{}", render_failures(.collection, .failures))]
    Entries {
        /// Collection being loaded.
        collection: String,
        /// Per-file failures, in path order.
        failures: Vec<EntryError>,
    },
}

fn render_failures(collection: &str, failures: &[EntryError]) -> String {
    let mut out = format!(
        "collection `{collection}` has {} invalid entr{}",
        failures.len(),
        if failures.len() == 1 { "y" } else { "ies" }
    );
    for failure in failures {
        out.push_str("\n\n");
        out.push_str(&failure.to_string());
    }
    out
}
