use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PathSegment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

/// Location of a field inside a frontmatter record (`title`, `heroImage.alt`, `tags[2]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Path pointing at the record itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a top-level field.
    pub fn field(name: impl Into<String>) -> Self {
        Self::root().key(name)
    }

    /// Extends the path with an object key.
    pub fn key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    /// Extends the path with an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true for the record root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if the path starts with the given top-level field name.
    pub fn starts_with_field(&self, name: &str) -> bool {
        matches!(self.segments.first(), Some(PathSegment::Key(key)) if key == name)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(name: &str) -> Self {
        Self::field(name)
    }
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field was absent or null.
    Required,
    /// The field held a value of the wrong JSON type.
    InvalidType {
        /// Type the schema expects.
        expected: &'static str,
        /// Type found in the record.
        received: &'static str,
    },
    /// A string exceeded its maximum length.
    TooLong {
        /// Maximum length in UTF-16 code units.
        max: usize,
    },
    /// The value could not be coerced into a calendar date.
    InvalidDate,
    /// The image reference was rejected by the resolver.
    InvalidImage(String),
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Required => f.write_str("Required"),
            ViolationKind::InvalidType { expected, received } => {
                write!(f, "Expected {expected}, received {received}")
            }
            ViolationKind::TooLong { max } => {
                write!(f, "String must contain at most {max} character(s)")
            }
            ViolationKind::InvalidDate => f.write_str("Invalid date"),
            ViolationKind::InvalidImage(reason) => write!(f, "Invalid image: {reason}"),
        }
    }
}

/// A single violated constraint.
///
/// Serializes as `{ "path": "heroImage.src", "message": "Required" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Offending field.
    #[serde(serialize_with = "serialize_display")]
    pub path: FieldPath,
    /// The broken constraint.
    #[serde(rename = "message", serialize_with = "serialize_display")]
    pub kind: ViolationKind,
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

impl Violation {
    /// Creates a violation at the given path.
    pub fn new(path: impl Into<FieldPath>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Human readable description without the path.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Every constraint a record broke, collected in field order.
///
/// Validators push into this instead of returning early, so an author sees
/// all problems of a file at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn push(&mut self, path: impl Into<FieldPath>, kind: ViolationKind) {
        self.violations.push(Violation::new(path, kind));
    }

    /// Returns true when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Recorded violations in the order they were found.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns true if any violation points at (or below) the named top-level field.
    pub fn has_field(&self, name: &str) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.path.starts_with_field(name))
    }

    /// Returns `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frontmatter does not match the collection schema ({} violation(s))",
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationError {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}
