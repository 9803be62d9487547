//! core::types
//!
//! Strong types for materialized paths.
//!
//! # Types
//!
//! - [`Path`] - Validated, dot-separated sequence of labels
//! - [`Rename`] - A single `old -> new` path rewrite
//!
//! # Validation
//!
//! A path is structurally valid when it has at least one label, no label is
//! empty, and no label contains the separator. Character-level rules (which
//! symbols a storage backend accepts) live in
//! [`LabelSyntax`](crate::core::alphabet::LabelSyntax).
//!
//! # Examples
//!
//! ```
//! use ltreework::core::types::Path;
//!
//! let path = Path::new("Top.Science.Astronomy").unwrap();
//! assert_eq!(path.depth(), 3);
//! assert_eq!(path.parent().unwrap().as_str(), "Top.Science");
//! assert_eq!(path.last_label(), "Astronomy");
//!
//! assert!(Path::new("").is_err());
//! assert!(Path::new("Top..Science").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::alphabet::LabelSyntax;

/// Separator between labels in the external string form.
pub const SEPARATOR: char = '.';

/// Errors from path validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path cannot be empty")]
    Empty,

    #[error("path '{0}' contains an empty label")]
    EmptyLabel(String),

    #[error("label '{0}' cannot contain the path separator")]
    SeparatorInLabel(String),

    #[error("label '{label}' is not valid under {syntax} label syntax")]
    InvalidLabel { label: String, syntax: LabelSyntax },
}

/// A validated materialized path.
///
/// The prefix relation on labels encodes ancestry and the number of labels
/// is the depth. Paths order like their string form, which is also sibling
/// order for fixed-width labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path(String);

impl Path {
    /// Create a new validated path.
    ///
    /// # Errors
    ///
    /// Returns `PathError` if the path is empty or contains an empty label.
    pub fn new(path: impl Into<String>) -> Result<Self, PathError> {
        let path = path.into();
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.split(SEPARATOR).any(str::is_empty) {
            return Err(PathError::EmptyLabel(path));
        }
        Ok(Self(path))
    }

    /// Create a depth-1 path from a single label.
    pub fn root(label: &str) -> Result<Self, PathError> {
        Self::check_label(label)?;
        Ok(Self(label.to_string()))
    }

    /// Append one label, producing a child path.
    pub fn child(&self, label: &str) -> Result<Self, PathError> {
        Self::check_label(label)?;
        Ok(Self(format!("{}{}{}", self.0, SEPARATOR, label)))
    }

    fn check_label(label: &str) -> Result<(), PathError> {
        if label.is_empty() {
            return Err(PathError::EmptyLabel(label.to_string()));
        }
        if label.contains(SEPARATOR) {
            return Err(PathError::SeparatorInLabel(label.to_string()));
        }
        Ok(())
    }

    /// Check every label against a backend's character and length rules.
    ///
    /// # Errors
    ///
    /// `PathError::InvalidLabel` naming the first offending label.
    pub fn check_syntax(&self, syntax: LabelSyntax) -> Result<(), PathError> {
        match self.labels().find(|label| !syntax.is_valid_label(label)) {
            Some(label) => Err(PathError::InvalidLabel {
                label: label.to_string(),
                syntax,
            }),
            None => Ok(()),
        }
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the labels, root first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// The final label.
    pub fn last_label(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(i) => &self.0[i + 1..],
            None => &self.0,
        }
    }

    /// Number of labels.
    pub fn depth(&self) -> usize {
        self.0.matches(SEPARATOR).count() + 1
    }

    /// The parent path, or `None` for a depth-1 path.
    pub fn parent(&self) -> Option<Path> {
        self.0
            .rfind(SEPARATOR)
            .map(|i| Path(self.0[..i].to_string()))
    }

    /// True if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0[self.0.len()..].starts_with(SEPARATOR)
    }

    /// True if `self` is a strict descendant of `other`.
    pub fn is_descendant_of(&self, other: &Path) -> bool {
        other.is_ancestor_of(self)
    }

    /// True if `self` is a direct child of `parent`.
    pub fn is_child_of(&self, parent: &Path) -> bool {
        self.depth() == parent.depth() + 1 && parent.is_ancestor_of(self)
    }

    /// True if both paths share a parent (or are both depth 1). A path is
    /// not its own sibling.
    pub fn is_sibling_of(&self, other: &Path) -> bool {
        self != other && self.parent() == other.parent()
    }

    /// Replace the `old` prefix of this path with `new`.
    ///
    /// Returns `None` if `old` is neither this path nor one of its ancestors.
    pub fn rebase(&self, old: &Path, new: &Path) -> Option<Path> {
        if self == old {
            Some(new.clone())
        } else if old.is_ancestor_of(self) {
            Some(Path(format!("{}{}", new.0, &self.0[old.0.len()..])))
        } else {
            None
        }
    }
}

impl TryFrom<String> for Path {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.0
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rewrite of one row's path, applied as part of a single batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    /// Path the row currently has.
    pub old: Path,
    /// Path the row will have after the batch.
    pub new: Path,
}

impl Rename {
    pub fn new(old: Path, new: Path) -> Self {
        Self { old, new }
    }
}

impl fmt::Display for Rename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old, self.new)
    }
}
