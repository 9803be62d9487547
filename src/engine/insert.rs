//! engine::insert
//!
//! Fetch, plan, apply.
//!
//! # Lifecycle
//!
//! 1. Fetch the ordered sibling scope for a [`Position`] from the store
//! 2. Plan with [`UpdatePlanner`]
//! 3. Apply the renames as one batch
//! 4. Hand the insertion points back; the caller writes the new rows there
//!
//! Steps 1 and 3 must share a transaction (or a lock on the parent row).
//! A [`PlanError::ReferenceNotFound`] means the scope moved underneath the
//! caller, who should re-fetch and retry.
//!
//! # Example
//!
//! ```
//! use ltreework::core::position::Position;
//! use ltreework::engine::insert::move_nodes;
//! use ltreework::engine::memory::MemoryStore;
//! use ltreework::engine::planner::UpdatePlanner;
//!
//! let store = MemoryStore::default();
//! let planner = UpdatePlanner::default();
//!
//! let paths = move_nodes(&store, &planner, &Position::Root, 2).unwrap();
//! assert_eq!(paths.len(), 2);
//! store.insert_all(paths).unwrap();
//! ```

use tracing::debug;

use super::planner::{InsertPlan, PlanError, UpdatePlanner};
use super::store::{AsyncTreeStore, TreeStore};
use crate::core::labeler::Labeler;
use crate::core::position::Position;
use crate::core::types::{Path, PathError};

/// Fetch the scope for `position` and plan inserting `count` nodes there.
pub fn plan_insert<S: TreeStore + ?Sized>(
    store: &S,
    planner: &UpdatePlanner,
    position: &Position,
    count: usize,
) -> Result<InsertPlan, PlanError> {
    let siblings = store.fetch_ordered_siblings(&position.scope())?;
    planner.plan(position, &siblings, count)
}

/// Async form of [`plan_insert`].
pub async fn plan_insert_async<S: AsyncTreeStore + ?Sized>(
    store: &S,
    planner: &UpdatePlanner,
    position: &Position,
    count: usize,
) -> Result<InsertPlan, PlanError> {
    let siblings = store.fetch_ordered_siblings(&position.scope()).await?;
    planner.plan(position, &siblings, count)
}

/// Make room for `count` nodes at `position` and return their paths.
///
/// Existing siblings are renamed as needed; the new rows are not written.
pub fn move_nodes<S: TreeStore + ?Sized>(
    store: &S,
    planner: &UpdatePlanner,
    position: &Position,
    count: usize,
) -> Result<Vec<Path>, PlanError> {
    let plan = plan_insert(store, planner, position, count)?;
    let renamed = store.apply_renames(&plan.renames)?;
    debug!(position = %position, renamed, "made room");
    Ok(plan.insertion_points)
}

/// Async form of [`move_nodes`].
pub async fn move_nodes_async<S: AsyncTreeStore + ?Sized>(
    store: &S,
    planner: &UpdatePlanner,
    position: &Position,
    count: usize,
) -> Result<Vec<Path>, PlanError> {
    let plan = plan_insert_async(store, planner, position, count).await?;
    let renamed = store.apply_renames(&plan.renames).await?;
    debug!(position = %position, renamed, "made room");
    Ok(plan.insertion_points)
}

/// A node to create, with its children in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    pub data: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// A node without children.
    pub fn leaf(data: T) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    pub fn with_children(data: T, children: Vec<TreeNode<T>>) -> Self {
        Self { data, children }
    }

    /// Number of nodes in this subtree, itself included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Assign paths to a whole subtree rooted at `path`.
///
/// Children are labeled afresh under each node. Output is pre-order, so
/// every parent precedes its children.
pub fn flatten_tree<T>(
    labeler: &Labeler,
    path: Path,
    node: TreeNode<T>,
) -> Result<Vec<(Path, T)>, PathError> {
    let mut out = Vec::with_capacity(node.size());
    flatten_into(labeler, path, node, &mut out)?;
    Ok(out)
}

fn flatten_into<T>(
    labeler: &Labeler,
    path: Path,
    node: TreeNode<T>,
    out: &mut Vec<(Path, T)>,
) -> Result<(), PathError> {
    let TreeNode { data, children } = node;
    let labeled: Vec<(String, TreeNode<T>)> = labeler.label(children).collect();
    out.push((path.clone(), data));
    for (label, child) in labeled {
        flatten_into(labeler, path.child(&label)?, child, out)?;
    }
    Ok(())
}

/// Make room for `trees.len()` nodes at `position` and lay out each tree
/// beneath its insertion point.
///
/// Returns `(path, data)` in pre-order, ready to be inserted in sequence.
pub fn create_tree<S: TreeStore + ?Sized, T>(
    store: &S,
    planner: &UpdatePlanner,
    position: &Position,
    trees: Vec<TreeNode<T>>,
) -> Result<Vec<(Path, T)>, PlanError> {
    let roots = move_nodes(store, planner, position, trees.len())?;
    layout(planner.labeler(), roots, trees)
}

/// Async form of [`create_tree`].
pub async fn create_tree_async<S: AsyncTreeStore + ?Sized, T>(
    store: &S,
    planner: &UpdatePlanner,
    position: &Position,
    trees: Vec<TreeNode<T>>,
) -> Result<Vec<(Path, T)>, PlanError> {
    let roots = move_nodes_async(store, planner, position, trees.len()).await?;
    layout(planner.labeler(), roots, trees)
}

fn layout<T>(
    labeler: &Labeler,
    roots: Vec<Path>,
    trees: Vec<TreeNode<T>>,
) -> Result<Vec<(Path, T)>, PlanError> {
    let mut out = Vec::with_capacity(trees.iter().map(TreeNode::size).sum());
    for (root, tree) in roots.into_iter().zip(trees) {
        flatten_into(labeler, root, tree, &mut out)?;
    }
    Ok(out)
}
