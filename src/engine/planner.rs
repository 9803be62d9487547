//! engine::planner
//!
//! Relabeling plans for sibling insertion.
//!
//! # Algorithm
//!
//! 1. Splice `count` vacant slots into the ordered sibling list where the
//!    [`Position`] says they go.
//! 2. Relabel the whole list at a fresh fixed width.
//! 3. Every existing sibling whose label changed becomes a [`Rename`];
//!    every vacant slot becomes an insertion point.
//!
//! Relabeling the whole scope always has room, because the width grows with
//! the scope. Diffing against the old labels keeps the writes to the siblings
//! that actually move; appending to a scope that was labeled by this planner
//! and still has spare capacity at its width writes nothing.
//!
//! # Invariants
//!
//! - Planning does no I/O and never mutates its input
//! - Insertion points come out in order and number exactly `count`
//! - Renames must be applied as one batch; individually they may collide
//!
//! # Example
//!
//! ```
//! use ltreework::core::position::Position;
//! use ltreework::core::types::Path;
//! use ltreework::engine::planner::UpdatePlanner;
//!
//! let planner = UpdatePlanner::new(ltreework::core::alphabet::Alphabet::sorted("abc").unwrap()).unwrap();
//! let siblings = vec![Path::new("Top.a").unwrap(), Path::new("Top.b").unwrap()];
//!
//! let plan = planner
//!     .plan(&Position::LastChildOf(Path::new("Top").unwrap()), &siblings, 1)
//!     .unwrap();
//!
//! assert!(plan.renames.is_empty());
//! assert_eq!(plan.insertion_points, vec![Path::new("Top.c").unwrap()]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::alphabet::{Alphabet, AlphabetError};
use crate::core::labeler::Labeler;
use crate::core::position::{Position, Scope};
use crate::core::types::{Path, PathError, Rename};
use crate::engine::store::StoreError;

/// Largest sibling scope, existing nodes plus inserts, that one plan covers.
pub const MAX_SCOPE_SLOTS: usize = 1 << 24;

/// Errors from planning an insertion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("insert count must be at least 1")]
    InvalidCount,

    #[error("cannot insert {count} nodes beside {siblings} siblings: a scope holds at most {max}")]
    CountTooLarge {
        count: usize,
        siblings: usize,
        max: usize,
    },

    /// The reference node is missing from its fetched scope. The position
    /// is stale or a concurrent move/delete happened; re-fetch and retry.
    #[error("reference node '{0}' not found in its sibling scope")]
    ReferenceNotFound(Path),

    #[error("'{path}' is not one of the {scope}")]
    OutOfScope { path: Path, scope: String },

    #[error("sibling scope is not in ascending order at '{path}'")]
    Unordered { path: Path },

    #[error("planner alphabet must be sorted: {0}")]
    UnsortedAlphabet(AlphabetError),

    #[error("generated label is not a valid path label: {0}")]
    InvalidLabel(#[from] PathError),

    /// Placeholder placement produced no insertion points. Always a bug.
    #[error("internal error: plan produced no insertion points")]
    NoInsertionPoints,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The outcome of planning: renames to apply, then paths to insert at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertPlan {
    /// Existing siblings whose label changes.
    pub renames: Vec<Rename>,
    /// Paths reserved for the new nodes, in insertion order.
    pub insertion_points: Vec<Path>,
}

impl InsertPlan {
    /// Paths the rename batch must be guarded on.
    pub fn guarded_paths(&self) -> Vec<&Path> {
        self.renames.iter().map(|r| &r.old).collect()
    }

    /// The new path for `old`, if it is renamed.
    pub fn renamed(&self, old: &Path) -> Option<&Path> {
        self.renames.iter().find(|r| &r.old == old).map(|r| &r.new)
    }

    /// True if no existing row needs to change.
    pub fn is_append_only(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Computes [`InsertPlan`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlanner {
    labeler: Labeler,
}

impl UpdatePlanner {
    /// Create a planner over a sorted alphabet.
    ///
    /// # Errors
    ///
    /// `PlanError::UnsortedAlphabet` if the alphabet is out of order, since
    /// label order would then disagree with sibling order.
    pub fn new(alphabet: Alphabet) -> Result<Self, PlanError> {
        Self::from_labeler(Labeler::with_alphabet(alphabet))
    }

    pub fn from_labeler(labeler: Labeler) -> Result<Self, PlanError> {
        labeler
            .alphabet()
            .check_sorted()
            .map_err(PlanError::UnsortedAlphabet)?;
        Ok(Self { labeler })
    }

    pub fn labeler(&self) -> &Labeler {
        &self.labeler
    }

    /// Plan inserting `count` nodes at `position`.
    ///
    /// `siblings` is the current content of `position.scope()`, ascending.
    ///
    /// # Errors
    ///
    /// - `PlanError::InvalidCount` if `count` is zero
    /// - `PlanError::CountTooLarge` if the scope would exceed [`MAX_SCOPE_SLOTS`]
    /// - `PlanError::ReferenceNotFound` if a `Before`/`After` reference is
    ///   missing from `siblings`
    /// - `PlanError::OutOfScope` / `PlanError::Unordered` if `siblings`
    ///   breaks the fetch contract
    pub fn plan(
        &self,
        position: &Position,
        siblings: &[Path],
        count: usize,
    ) -> Result<InsertPlan, PlanError> {
        if count == 0 {
            return Err(PlanError::InvalidCount);
        }
        match siblings.len().checked_add(count) {
            Some(total) if total <= MAX_SCOPE_SLOTS => {}
            _ => {
                return Err(PlanError::CountTooLarge {
                    count,
                    siblings: siblings.len(),
                    max: MAX_SCOPE_SLOTS,
                })
            }
        }
        check_scope(&position.scope(), siblings)?;

        let slots = insert_placeholders(position, siblings, count)?;
        let parent = position.parent();

        let mut plan = InsertPlan::default();
        for (label, slot) in self.labeler.label(slots) {
            let new_path = match &parent {
                Some(parent) => parent.child(&label)?,
                None => Path::root(&label)?,
            };

            match slot {
                None => {
                    trace!(path = %new_path, "insertion point");
                    plan.insertion_points.push(new_path);
                }
                Some(old) if *old != new_path => {
                    trace!(old = %old, new = %new_path, "rename");
                    plan.renames.push(Rename::new(old.clone(), new_path));
                }
                Some(_) => {}
            }
        }

        if plan.insertion_points.is_empty() {
            return Err(PlanError::NoInsertionPoints);
        }

        debug!(
            position = %position,
            siblings = siblings.len(),
            renames = plan.renames.len(),
            inserted = plan.insertion_points.len(),
            "planned insert"
        );

        Ok(plan)
    }
}

impl Default for UpdatePlanner {
    fn default() -> Self {
        Self {
            labeler: Labeler::default(),
        }
    }
}

/// Every sibling must belong to the scope, in strictly ascending order.
fn check_scope(scope: &Scope, siblings: &[Path]) -> Result<(), PlanError> {
    if let Some(path) = siblings.iter().find(|p| !scope.contains(p)) {
        return Err(PlanError::OutOfScope {
            path: path.clone(),
            scope: scope.to_string(),
        });
    }
    if let Some(pair) = siblings.windows(2).find(|w| w[0] >= w[1]) {
        return Err(PlanError::Unordered {
            path: pair[1].clone(),
        });
    }
    Ok(())
}

/// Splice `count` vacant slots (`None`) into the sibling list.
fn insert_placeholders<'a>(
    position: &Position,
    siblings: &'a [Path],
    count: usize,
) -> Result<Vec<Option<&'a Path>>, PlanError> {
    let index_of = |reference: &Path| {
        siblings
            .iter()
            .position(|p| p == reference)
            .ok_or_else(|| PlanError::ReferenceNotFound(reference.clone()))
    };

    let at = match position {
        Position::After(reference) => index_of(reference)? + 1,
        Position::Before(reference) => index_of(reference)?,
        Position::FirstChildOf(_) => 0,
        Position::LastChildOf(_) | Position::Root => siblings.len(),
    };

    let mut slots: Vec<Option<&Path>> = Vec::with_capacity(siblings.len() + count);
    slots.extend(siblings[..at].iter().map(Some));
    slots.extend(std::iter::repeat(None).take(count));
    slots.extend(siblings[at..].iter().map(Some));
    Ok(slots)
}
