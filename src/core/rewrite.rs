//! core::rewrite
//!
//! Integer-keyed child rewrites.
//!
//! An alternative to string relabeling: children carry integer keys (which
//! [`PaddedCodec`](super::codec::PaddedCodec) turns into fixed-width labels)
//! and making room for a new child means moving some existing keys. Both
//! rewrites below reserve one vacant slot at index `nth` and report only the
//! keys that actually change.
//!
//! - [`rewrite_children_dense`] packs keys into `0..=n`.
//! - [`rewrite_children_sparse`] spreads them evenly over `0..=max_value`,
//!   leaving gaps so later inserts can often land between existing keys.
//!
//! Children must be given in ascending key order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from integer rewrites.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("slot {nth} is beyond the maximum key {max_value}")]
    OutOfRange { nth: usize, max_value: u64 },

    #[error("{slots} children do not fit in keys 0..={max_value}")]
    Exhausted { slots: usize, max_value: u64 },
}

/// Result of a rewrite: the key for the new child and the moves to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOp {
    /// Key reserved for the new child.
    pub new_child: u64,
    /// `(old_key, new_key)` for each child whose key changes.
    pub moves: Vec<(u64, u64)>,
}

/// `0..stop` with `excluding` left out. The full range when
/// `excluding >= stop`.
pub fn range_excluding(stop: u64, excluding: u64) -> impl Iterator<Item = u64> {
    (0..stop).filter(move |&i| i != excluding)
}

/// Pack children into consecutive keys, leaving slot `nth` vacant.
///
/// `nth` past the end appends.
///
/// # Example
///
/// ```
/// use ltreework::core::rewrite::rewrite_children_dense;
///
/// let op = rewrite_children_dense(&[0, 2, 5, 10], 2);
/// assert_eq!(op.new_child, 2);
/// assert_eq!(op.moves, vec![(2, 1), (5, 3), (10, 4)]);
/// ```
pub fn rewrite_children_dense(children: &[u64], nth: usize) -> MoveOp {
    let n = children.len();
    let nth = nth.min(n) as u64;
    let slots = range_excluding(n as u64 + 1, nth);

    MoveOp {
        new_child: nth,
        moves: collect_moves(children, slots),
    }
}

/// Spread children evenly over `0..=max_value`, leaving slot `nth` vacant.
///
/// Slots are `step` apart where `step = (max_value + 1) / (n + 1)`, and the
/// leftover space is split between both ends.
///
/// # Errors
///
/// `RewriteError::OutOfRange` if `nth > max_value`, and
/// `RewriteError::Exhausted` if there are more slots than keys.
pub fn rewrite_children_sparse(
    children: &[u64],
    nth: usize,
    max_value: u64,
) -> Result<MoveOp, RewriteError> {
    if nth as u128 > max_value as u128 {
        return Err(RewriteError::OutOfRange { nth, max_value });
    }

    let n = children.len();
    let slots = n as u128 + 1;
    let span = max_value as u128 + 1;
    let step = span / slots;
    if step == 0 {
        return Err(RewriteError::Exhausted {
            slots: n + 1,
            max_value,
        });
    }
    let left_gap = (span - step * slots) / 2;
    // Every slot key is at most left_gap + step * n < span, so it fits in u64.
    let key = move |slot: u64| (left_gap + step * slot as u128) as u64;

    let nth = nth.min(n) as u64;
    let keys = range_excluding(n as u64 + 1, nth).map(key);

    Ok(MoveOp {
        new_child: key(nth),
        moves: collect_moves(children, keys),
    })
}

fn collect_moves(children: &[u64], keys: impl Iterator<Item = u64>) -> Vec<(u64, u64)> {
    children
        .iter()
        .zip(keys)
        .filter(|(child, key)| **child != *key)
        .map(|(child, key)| (*child, key))
        .collect()
}
