//! engine::store
//!
//! Storage collaborator traits.
//!
//! # Design
//!
//! The planner never touches storage. Around it, two narrow operations are
//! needed from whatever holds the nodes:
//!
//! - fetch the current, ordered paths of one sibling scope
//! - apply a batch of renames as a single atomic write
//!
//! The store, not the planner, is responsible for descendants: after a
//! rename it either rewrites every row under the old path
//! ([`DescendantPolicy::Cascade`]) or rejects the write
//! ([`DescendantPolicy::Protect`]). New non-root paths must have an existing
//! parent row.
//!
//! Fetch and apply should run inside one transaction (or while holding a
//! lock on the parent row). Two concurrent inserts into the same scope that
//! both plan against the same snapshot compute overlapping rename sets.
//!
//! [`TreeStore`] is the blocking form and [`AsyncTreeStore`] the async form;
//! they have identical semantics.
//!
//! # Example
//!
//! ```
//! use ltreework::core::position::Scope;
//! use ltreework::core::types::Path;
//! use ltreework::engine::memory::MemoryStore;
//! use ltreework::engine::store::{AsyncTreeStore, DescendantPolicy};
//!
//! let store = MemoryStore::from_snapshot(
//!     DescendantPolicy::Protect,
//!     [Path::new("b").unwrap(), Path::new("a").unwrap()],
//! );
//! let store: &dyn AsyncTreeStore = &store;
//!
//! let roots = tokio_test::block_on(store.fetch_ordered_siblings(&Scope::Roots)).unwrap();
//! assert_eq!(roots, vec![Path::new("a").unwrap(), Path::new("b").unwrap()]);
//! assert_eq!(tokio_test::block_on(store.apply_renames(&[])).unwrap(), 0);
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::position::Scope;
use crate::core::types::{Path, Rename};

/// Errors from storage operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A non-root path was written without an existing parent row.
    #[error("parent of '{0}' does not exist")]
    ParentMissing(Path),

    /// A path was inserted twice.
    #[error("'{0}' already exists")]
    AlreadyExists(Path),

    /// A guarded row was not present.
    #[error("'{0}' not found")]
    NotFound(Path),

    /// A protected node with descendants was renamed or deleted.
    #[error("'{0}' has descendants and is protected")]
    Protected(Path),

    /// A batch would leave two rows on the same path.
    #[error("rename would collide at '{0}'")]
    Conflict(Path),

    /// Backend-specific failure.
    #[error("storage error: {0}")]
    Backend(String),
}

/// What the store does to descendants when a node is renamed or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescendantPolicy {
    /// Rewrite or remove every descendant along with the node.
    #[default]
    Cascade,
    /// Reject the change while descendants exist.
    Protect,
}

/// Blocking storage collaborator.
pub trait TreeStore {
    /// Paths in `scope`, sorted ascending.
    ///
    /// For sibling scopes the reference node itself is included.
    fn fetch_ordered_siblings(&self, scope: &Scope) -> Result<Vec<Path>, StoreError>;

    /// Apply every rename in one atomic write, returning the number of rows
    /// renamed directly. An empty batch is a no-op returning 0.
    fn apply_renames(&self, renames: &[Rename]) -> Result<usize, StoreError>;
}

/// Async storage collaborator.
#[async_trait]
pub trait AsyncTreeStore: Send + Sync {
    /// See [`TreeStore::fetch_ordered_siblings`].
    async fn fetch_ordered_siblings(&self, scope: &Scope) -> Result<Vec<Path>, StoreError>;

    /// See [`TreeStore::apply_renames`].
    async fn apply_renames(&self, renames: &[Rename]) -> Result<usize, StoreError>;
}
