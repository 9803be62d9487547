//! engine::memory
//!
//! In-memory tree store.
//!
//! # Design
//!
//! [`MemoryStore`] implements both [`TreeStore`] and [`AsyncTreeStore`] over
//! an ordered set of paths. It enforces the same rules a database with ltree
//! triggers would:
//!
//! - inserts need an existing parent and a free path
//! - a rename batch is all-or-nothing, guarded on every old path
//! - descendants follow a renamed or deleted node ([`DescendantPolicy::Cascade`])
//!   or block the change ([`DescendantPolicy::Protect`])
//!
//! Clones share state, so one store can be handed to several tasks.
//!
//! # Example
//!
//! ```
//! use ltreework::core::position::Scope;
//! use ltreework::core::types::{Path, Rename};
//! use ltreework::engine::memory::MemoryStore;
//! use ltreework::engine::store::DescendantPolicy;
//!
//! let store = MemoryStore::new(DescendantPolicy::Cascade);
//! store.insert(Path::new("a").unwrap()).unwrap();
//! store.insert(Path::new("a.x").unwrap()).unwrap();
//!
//! store
//!     .rename_all(&[Rename::new(Path::new("a").unwrap(), Path::new("b").unwrap())])
//!     .unwrap();
//!
//! assert!(store.contains(&Path::new("b.x").unwrap()));
//! assert_eq!(store.siblings(&Scope::Roots).unwrap(), vec![Path::new("b").unwrap()]);
//! ```

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::store::{AsyncTreeStore, DescendantPolicy, StoreError, TreeStore};
use crate::core::position::Scope;
use crate::core::types::{Path, Rename};

/// In-memory store of node paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    paths: BTreeSet<Path>,
    policy: DescendantPolicy,
    fail_on: Option<FailOn>,
    operations: Vec<StoreOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail fetches with the given error.
    Fetch(StoreError),
    /// Fail rename batches with the given error.
    Apply(StoreError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    Fetch { scope: Scope },
    ApplyRenames { renames: Vec<Rename> },
    Insert { path: Path },
    Delete { path: Path },
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new(policy: DescendantPolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryStoreInner {
                policy,
                ..MemoryStoreInner::default()
            })),
        }
    }

    /// Load existing rows without parent checks.
    ///
    /// Used to mirror a snapshot fetched from elsewhere, where only some
    /// levels of the tree are known.
    pub fn from_snapshot(policy: DescendantPolicy, paths: impl IntoIterator<Item = Path>) -> Self {
        let store = Self::new(policy);
        store.inner.lock().unwrap().paths.extend(paths);
        store
    }

    /// Configure the store to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        self.inner.lock().unwrap().fail_on = None;
    }

    pub fn policy(&self) -> DescendantPolicy {
        self.inner.lock().unwrap().policy
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.inner.lock().unwrap().paths.contains(path)
    }

    /// Every stored path, ascending.
    pub fn paths(&self) -> Vec<Path> {
        self.inner.lock().unwrap().paths.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert one row.
    ///
    /// # Errors
    ///
    /// `StoreError::AlreadyExists` or `StoreError::ParentMissing`.
    pub fn insert(&self, path: Path) -> Result<(), StoreError> {
        self.insert_all(std::iter::once(path))
    }

    /// Insert rows in order, all or nothing.
    ///
    /// A row's parent may be inserted earlier in the same batch.
    pub fn insert_all(&self, paths: impl IntoIterator<Item = Path>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let mut staged = inner.paths.clone();
        let mut inserted = Vec::new();

        for path in paths {
            if staged.contains(&path) {
                return Err(StoreError::AlreadyExists(path));
            }
            if let Some(parent) = path.parent() {
                if !staged.contains(&parent) {
                    return Err(StoreError::ParentMissing(path));
                }
            }
            staged.insert(path.clone());
            inserted.push(path);
        }

        inner.paths = staged;
        inner
            .operations
            .extend(inserted.into_iter().map(|path| StoreOperation::Insert { path }));
        Ok(())
    }

    /// Delete a row, returning how many rows were removed.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound`, or `StoreError::Protected` when the node has
    /// descendants under [`DescendantPolicy::Protect`].
    pub fn delete(&self, path: &Path) -> Result<usize, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.paths.contains(path) {
            return Err(StoreError::NotFound(path.clone()));
        }

        let subtree: Vec<Path> = inner
            .paths
            .iter()
            .filter(|p| *p == path || p.is_descendant_of(path))
            .cloned()
            .collect();

        if subtree.len() > 1 && inner.policy == DescendantPolicy::Protect {
            warn!(path = %path, "delete rejected, node has descendants");
            return Err(StoreError::Protected(path.clone()));
        }

        for p in &subtree {
            inner.paths.remove(p);
        }
        inner
            .operations
            .push(StoreOperation::Delete { path: path.clone() });
        Ok(subtree.len())
    }

    /// Paths in `scope`, ascending.
    pub fn siblings(&self, scope: &Scope) -> Result<Vec<Path>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(FailOn::Fetch(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner.operations.push(StoreOperation::Fetch {
            scope: scope.clone(),
        });
        Ok(inner
            .paths
            .iter()
            .filter(|p| scope.contains(p))
            .cloned()
            .collect())
    }

    /// Apply a rename batch atomically.
    ///
    /// Every old path must exist. Under [`DescendantPolicy::Cascade`] each
    /// descendant is rewritten along with its deepest renamed ancestor.
    /// Returns the number of rows renamed directly.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if an old path is missing
    /// - `StoreError::Protected` if a renamed node has descendants under
    ///   [`DescendantPolicy::Protect`]
    /// - `StoreError::Conflict` if two rows would end up on one path
    /// - `StoreError::ParentMissing` if a new path has no parent row
    pub fn rename_all(&self, renames: &[Rename]) -> Result<usize, StoreError> {
        if renames.is_empty() {
            return Ok(0);
        }

        let mut inner = self.inner.lock().unwrap();
        if let Some(FailOn::Apply(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        let mut seen = HashSet::new();
        for rename in renames {
            if !inner.paths.contains(&rename.old) {
                return Err(StoreError::NotFound(rename.old.clone()));
            }
            if !seen.insert(&rename.new) {
                return Err(StoreError::Conflict(rename.new.clone()));
            }
        }

        let mut staged = BTreeSet::new();
        let mut moved = Vec::new();
        let mut cascaded = 0;
        for path in &inner.paths {
            let Some(rename) = deepest_rename(renames, path) else {
                staged.insert(path.clone());
                continue;
            };
            if *path != rename.old {
                if inner.policy == DescendantPolicy::Protect && rename.old != rename.new {
                    warn!(path = %rename.old, "rename rejected, node has descendants");
                    return Err(StoreError::Protected(rename.old.clone()));
                }
                cascaded += 1;
            }
            // rebase cannot fail: deepest_rename only matches the old path or
            // its descendants.
            if let Some(new_path) = path.rebase(&rename.old, &rename.new) {
                moved.push(new_path);
            }
        }

        for path in moved {
            if !staged.insert(path.clone()) {
                return Err(StoreError::Conflict(path));
            }
        }
        for rename in renames {
            if let Some(parent) = rename.new.parent() {
                if !staged.contains(&parent) {
                    return Err(StoreError::ParentMissing(rename.new.clone()));
                }
            }
        }

        inner.paths = staged;
        inner.operations.push(StoreOperation::ApplyRenames {
            renames: renames.to_vec(),
        });
        debug!(renamed = renames.len(), cascaded, "applied rename batch");
        Ok(renames.len())
    }
}

/// The rename whose old path is `path` or its deepest ancestor.
fn deepest_rename<'a>(renames: &'a [Rename], path: &Path) -> Option<&'a Rename> {
    renames
        .iter()
        .filter(|r| r.old == *path || r.old.is_ancestor_of(path))
        .max_by_key(|r| r.old.depth())
}

impl TreeStore for MemoryStore {
    fn fetch_ordered_siblings(&self, scope: &Scope) -> Result<Vec<Path>, StoreError> {
        self.siblings(scope)
    }

    fn apply_renames(&self, renames: &[Rename]) -> Result<usize, StoreError> {
        self.rename_all(renames)
    }
}

#[async_trait]
impl AsyncTreeStore for MemoryStore {
    async fn fetch_ordered_siblings(&self, scope: &Scope) -> Result<Vec<Path>, StoreError> {
        self.siblings(scope)
    }

    async fn apply_renames(&self, renames: &[Rename]) -> Result<usize, StoreError> {
        self.rename_all(renames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Path {
        Path::new(s).unwrap()
    }

    fn store(policy: DescendantPolicy, paths: &[&str]) -> MemoryStore {
        let store = MemoryStore::new(policy);
        store.insert_all(paths.iter().map(|s| p(s))).unwrap();
        store
    }

    mod insert {
        use super::*;

        #[test]
        fn requires_parent() {
            let store = MemoryStore::default();
            assert_eq!(
                store.insert(p("a.b")),
                Err(StoreError::ParentMissing(p("a.b")))
            );
            store.insert(p("a")).unwrap();
            store.insert(p("a.b")).unwrap();
            assert_eq!(store.len(), 2);
        }

        #[test]
        fn rejects_duplicates() {
            let store = store(DescendantPolicy::Cascade, &["a"]);
            assert_eq!(store.insert(p("a")), Err(StoreError::AlreadyExists(p("a"))));
        }

        #[test]
        fn batch_is_all_or_nothing() {
            let store = MemoryStore::default();
            let result = store.insert_all([p("a"), p("a.b"), p("c.d")]);
            assert_eq!(result, Err(StoreError::ParentMissing(p("c.d"))));
            assert!(store.is_empty());
        }
    }

    mod delete {
        use super::*;

        #[test]
        fn cascade_removes_subtree() {
            let store = store(DescendantPolicy::Cascade, &["a", "a.b", "a.b.c", "ab"]);
            assert_eq!(store.delete(&p("a")), Ok(3));
            assert_eq!(store.paths(), vec![p("ab")]);
        }

        #[test]
        fn protect_rejects_with_descendants() {
            let store = store(DescendantPolicy::Protect, &["a", "a.b"]);
            assert_eq!(store.delete(&p("a")), Err(StoreError::Protected(p("a"))));
            assert_eq!(store.delete(&p("a.b")), Ok(1));
            assert_eq!(store.delete(&p("a")), Ok(1));
        }

        #[test]
        fn missing_path() {
            let store = MemoryStore::default();
            assert_eq!(store.delete(&p("a")), Err(StoreError::NotFound(p("a"))));
        }
    }

    mod siblings {
        use super::*;

        #[test]
        fn fetch_by_scope() {
            let store = store(
                DescendantPolicy::Cascade,
                &["a", "a.1", "a.1.x", "a.2", "b", "b.1"],
            );
            assert_eq!(store.siblings(&Scope::Roots).unwrap(), vec![p("a"), p("b")]);
            assert_eq!(
                store.siblings(&Scope::ChildrenOf(p("a"))).unwrap(),
                vec![p("a.1"), p("a.2")]
            );
            assert_eq!(
                store.siblings(&Scope::SiblingsOf(p("a.2"))).unwrap(),
                vec![p("a.1"), p("a.2")]
            );
        }

        #[test]
        fn injected_failure() {
            let store = MemoryStore::default()
                .fail_on(FailOn::Fetch(StoreError::Backend("down".into())));
            assert_eq!(
                store.siblings(&Scope::Roots),
                Err(StoreError::Backend("down".into()))
            );
            store.clear_fail_on();
            assert!(store.siblings(&Scope::Roots).is_ok());
        }
    }

    mod rename {
        use super::*;

        #[test]
        fn empty_batch_is_noop() {
            let store = store(DescendantPolicy::Cascade, &["a"]);
            assert_eq!(store.rename_all(&[]), Ok(0));
            assert!(store.operations().iter().all(|op| !matches!(op, StoreOperation::ApplyRenames { .. })));
        }

        #[test]
        fn shifting_siblings_do_not_collide() {
            let store = store(DescendantPolicy::Cascade, &["1", "2"]);
            let renames = vec![Rename::new(p("1"), p("2")), Rename::new(p("2"), p("3"))];
            assert_eq!(store.rename_all(&renames), Ok(2));
            assert_eq!(store.paths(), vec![p("2"), p("3")]);
        }

        #[test]
        fn cascade_moves_descendants() {
            let store = store(DescendantPolicy::Cascade, &["a", "a.x", "a.x.y", "b"]);
            store
                .rename_all(&[Rename::new(p("a"), p("c"))])
                .unwrap();
            assert_eq!(
                store.paths(),
                vec![p("b"), p("c"), p("c.x"), p("c.x.y")]
            );
        }

        #[test]
        fn protect_rejects_nodes_with_descendants() {
            let store = store(DescendantPolicy::Protect, &["a", "a.x", "b"]);
            assert_eq!(
                store.rename_all(&[Rename::new(p("a"), p("c"))]),
                Err(StoreError::Protected(p("a")))
            );
            assert_eq!(store.rename_all(&[Rename::new(p("b"), p("c"))]), Ok(1));
        }

        #[test]
        fn collision_with_unrelated_row_fails_atomically() {
            let store = store(DescendantPolicy::Cascade, &["a", "b", "c"]);
            let before = store.paths();
            assert_eq!(
                store.rename_all(&[Rename::new(p("a"), p("d")), Rename::new(p("b"), p("c"))]),
                Err(StoreError::Conflict(p("c")))
            );
            assert_eq!(store.paths(), before);
        }

        #[test]
        fn guarded_on_old_paths() {
            let store = store(DescendantPolicy::Cascade, &["a"]);
            assert_eq!(
                store.rename_all(&[Rename::new(p("z"), p("y"))]),
                Err(StoreError::NotFound(p("z")))
            );
        }

        #[test]
        fn duplicate_targets_conflict() {
            let store = store(DescendantPolicy::Cascade, &["a", "b"]);
            assert_eq!(
                store.rename_all(&[Rename::new(p("a"), p("c")), Rename::new(p("b"), p("c"))]),
                Err(StoreError::Conflict(p("c")))
            );
        }

        #[test]
        fn new_path_needs_parent() {
            let store = store(DescendantPolicy::Cascade, &["a", "a.b"]);
            assert_eq!(
                store.rename_all(&[Rename::new(p("a.b"), p("z.b"))]),
                Err(StoreError::ParentMissing(p("z.b")))
            );
        }
    }

    #[tokio::test]
    async fn async_trait_delegates() {
        let store = store(DescendantPolicy::Cascade, &["a", "b"]);
        let siblings = AsyncTreeStore::fetch_ordered_siblings(&store, &Scope::Roots)
            .await
            .unwrap();
        assert_eq!(siblings, vec![p("a"), p("b")]);

        let renamed = AsyncTreeStore::apply_renames(&store, &[Rename::new(p("b"), p("c"))])
            .await
            .unwrap();
        assert_eq!(renamed, 1);
        assert!(store.contains(&p("c")));
    }

    #[test]
    fn usable_as_trait_object() {
        let store = store(DescendantPolicy::Cascade, &["a"]);
        let dyn_store: &dyn AsyncTreeStore = &store;

        let failing = store.clone().fail_on(FailOn::Apply(StoreError::Backend("down".into())));
        assert_eq!(
            tokio_test::block_on(dyn_store.apply_renames(&[Rename::new(p("a"), p("b"))])),
            Err(StoreError::Backend("down".into()))
        );

        failing.clear_fail_on();
        assert_eq!(
            tokio_test::block_on(dyn_store.fetch_ordered_siblings(&Scope::Roots)),
            Ok(vec![p("a")])
        );
    }
}
