//! Resolution of `heroImage.src` references.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// An image reference after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    /// Reference as written in the frontmatter.
    pub src: String,
    /// File on disk the reference points to, when it could be located.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Why an image reference was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// Empty `src`.
    #[error("image source is empty")]
    Empty,
    /// Remote URLs cannot be processed at build time.
    #[error("remote image `{0}` is not supported, use a local file")]
    Remote(String),
    /// Relative reference with no entry file to resolve against.
    #[error("cannot resolve `{0}` without the entry file location")]
    NoBase(String),
    /// The referenced file does not exist.
    #[error("image file {} does not exist", .0.display())]
    NotFound(PathBuf),
}

/// Turns `heroImage.src` strings into image references.
pub trait ImageResolver: Send + Sync {
    /// Resolves `src` for the entry stored at `entry_file`, if known.
    fn resolve(&self, src: &str, entry_file: Option<&Path>) -> Result<ResolvedImage, ImageError>;
}

/// Accepts any non-empty reference without touching the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughImageResolver;

impl ImageResolver for PassthroughImageResolver {
    fn resolve(&self, src: &str, _entry_file: Option<&Path>) -> Result<ResolvedImage, ImageError> {
        if src.trim().is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(ResolvedImage {
            src: src.to_string(),
            path: None,
        })
    }
}

/// Resolves local image files next to the entry or inside a public directory.
///
/// `./` and `../` references (and bare file names) are resolved against the
/// entry's directory, `/`-rooted ones against the public directory. Remote
/// URLs are rejected.
#[derive(Debug, Clone, Default)]
pub struct RelativeImageResolver {
    public_dir: Option<PathBuf>,
    require_exists: bool,
}

impl RelativeImageResolver {
    /// Creates a resolver that does not check the filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory `/`-rooted references resolve against.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    /// Rejects references whose file is missing on disk.
    pub fn require_exists(mut self, require: bool) -> Self {
        self.require_exists = require;
        self
    }

    fn locate(&self, src: &str, entry_file: Option<&Path>) -> Result<PathBuf, ImageError> {
        if let Some(rooted) = src.strip_prefix('/') {
            return match &self.public_dir {
                Some(public) => Ok(normalize_path(&public.join(rooted))),
                None => Err(ImageError::NoBase(src.to_string())),
            };
        }

        let dir = entry_file
            .and_then(Path::parent)
            .ok_or_else(|| ImageError::NoBase(src.to_string()))?;
        Ok(normalize_path(&dir.join(src)))
    }
}

impl ImageResolver for RelativeImageResolver {
    fn resolve(&self, src: &str, entry_file: Option<&Path>) -> Result<ResolvedImage, ImageError> {
        let trimmed = src.trim();
        if trimmed.is_empty() {
            return Err(ImageError::Empty);
        }
        if is_remote(trimmed) {
            return Err(ImageError::Remote(trimmed.to_string()));
        }

        let path = self.locate(trimmed, entry_file)?;
        if self.require_exists && !path.is_file() {
            return Err(ImageError::NotFound(path));
        }

        Ok(ResolvedImage {
            src: src.to_string(),
            path: Some(path),
        })
    }
}

fn is_remote(src: &str) -> bool {
    src.starts_with("//") || src.contains("://") || src.starts_with("data:")
}

/// Lexically removes `.` and `..` components.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}
