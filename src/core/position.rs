//! core::position
//!
//! Relative insertion points.
//!
//! # Overview
//!
//! A [`Position`] names where new nodes go relative to an existing node (or
//! the forest root). It holds the reference node's *path*, extracted once by
//! the caller; the referenced node is never owned.
//!
//! Two queries drive planning:
//! - [`Position::scope`] - which sibling set is affected
//! - [`Position::parent`] - the parent path new labels are appended to
//!
//! # Example
//!
//! ```
//! use ltreework::core::position::{Position, Scope};
//! use ltreework::core::types::Path;
//!
//! let node = Path::new("Top.B").unwrap();
//! let position = Position::Before(node.clone());
//!
//! assert_eq!(position.scope(), Scope::SiblingsOf(node));
//! assert_eq!(position.parent(), Some(Path::new("Top").unwrap()));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::Path;

/// Where to insert new nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Position {
    /// Append to the top level.
    Root,
    /// Prepend to the node's children.
    FirstChildOf(Path),
    /// Append to the node's children.
    LastChildOf(Path),
    /// Immediately before the node, among its siblings.
    Before(Path),
    /// Immediately after the node, among its siblings.
    After(Path),
}

/// The sibling set a position affects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Depth-1 nodes.
    Roots,
    /// Direct children of the path.
    ChildrenOf(Path),
    /// Nodes sharing the path's parent, the path itself included.
    SiblingsOf(Path),
}

impl Position {
    /// The reference node, if any.
    pub fn reference(&self) -> Option<&Path> {
        match self {
            Position::Root => None,
            Position::FirstChildOf(p)
            | Position::LastChildOf(p)
            | Position::Before(p)
            | Position::After(p) => Some(p),
        }
    }

    /// The sibling set new nodes join.
    pub fn scope(&self) -> Scope {
        match self {
            Position::Root => Scope::Roots,
            Position::FirstChildOf(p) | Position::LastChildOf(p) => Scope::ChildrenOf(p.clone()),
            Position::Before(p) | Position::After(p) => Scope::SiblingsOf(p.clone()),
        }
    }

    /// Parent of the new nodes; `None` means the top level.
    pub fn parent(&self) -> Option<Path> {
        match self {
            Position::Root => None,
            Position::FirstChildOf(p) | Position::LastChildOf(p) => Some(p.clone()),
            Position::Before(p) | Position::After(p) => p.parent(),
        }
    }

    /// The string prefix for new paths: empty at the top level, otherwise
    /// the parent path followed by the separator.
    pub fn prefix(&self) -> String {
        match self.parent() {
            Some(parent) => format!("{}{}", parent, super::types::SEPARATOR),
            None => String::new(),
        }
    }
}

impl Scope {
    /// Parent path shared by every member, `None` for the top level.
    pub fn parent(&self) -> Option<Path> {
        match self {
            Scope::Roots => None,
            Scope::ChildrenOf(p) => Some(p.clone()),
            Scope::SiblingsOf(p) => p.parent(),
        }
    }

    /// True if `path` belongs to this sibling set.
    pub fn contains(&self, path: &Path) -> bool {
        match self.parent() {
            Some(parent) => path.is_child_of(&parent),
            None => path.depth() == 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Root => write!(f, "root"),
            Position::FirstChildOf(p) => write!(f, "first child of {}", p),
            Position::LastChildOf(p) => write!(f, "last child of {}", p),
            Position::Before(p) => write!(f, "before {}", p),
            Position::After(p) => write!(f, "after {}", p),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Roots => write!(f, "roots"),
            Scope::ChildrenOf(p) => write!(f, "children of {}", p),
            Scope::SiblingsOf(p) => write!(f, "siblings of {}", p),
        }
    }
}
