//! Property-based tests for labeling, encoding, and planning.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated scopes and positions.

use proptest::prelude::*;

use ltreework::core::alphabet::Alphabet;
use ltreework::core::codec::{CodecError, PaddedCodec};
use ltreework::core::labeler::Labeler;
use ltreework::core::position::Position;
use ltreework::core::types::Path;
use ltreework::engine::memory::MemoryStore;
use ltreework::engine::planner::{PlanError, UpdatePlanner};
use ltreework::engine::store::DescendantPolicy;

/// A small alphabet, so scopes of a few dozen nodes cross width boundaries.
fn abc() -> Alphabet {
    Alphabet::sorted("abc").unwrap()
}

fn top() -> Path {
    Path::new("t").unwrap()
}

/// `n` siblings as this crate would have labeled them.
fn labeled_scope(parent: Option<&Path>, n: usize) -> Vec<Path> {
    Labeler::with_alphabet(abc())
        .label(0..n)
        .map(|(label, _)| match parent {
            Some(p) => p.child(&label).unwrap(),
            None => Path::root(&label).unwrap(),
        })
        .collect()
}

proptest! {
    /// Encoding is a bijection onto fixed-width strings and preserves order.
    #[test]
    fn codec_round_trips_in_order(a in 0u64..262_144, b in 0u64..262_144) {
        let codec = PaddedCodec::modern(3).unwrap();
        let ea = codec.encode(a).unwrap();
        let eb = codec.encode(b).unwrap();

        prop_assert_eq!(ea.chars().count(), 3);
        prop_assert_eq!(codec.decode(&ea).unwrap(), a);
        prop_assert_eq!(a.cmp(&b), ea.cmp(&eb));
    }

    /// Labels share one minimal width and ascend strictly.
    #[test]
    fn labels_are_fixed_width_and_ascending(n in 0usize..400) {
        let labeler = Labeler::with_alphabet(abc());
        let labels: Vec<String> = labeler.label(0..n).map(|(label, _)| label).collect();
        let width = labeler.width_for(n);

        prop_assert_eq!(labels.len(), n);
        prop_assert!(labels.iter().all(|l| l.chars().count() == width));
        prop_assert!(labels.windows(2).all(|w| w[0] < w[1]));
        if n > 1 {
            prop_assert!(3usize.pow(width as u32 - 1) < n);
            prop_assert!(n <= 3usize.pow(width as u32));
        }
    }

    /// Applying a plan and inserting at its points yields the intended order.
    #[test]
    fn applied_plan_realizes_intended_order(
        existing in 0usize..30,
        count in 1usize..6,
        kind in 0u8..5,
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(kind < 3 || existing > 0);

        let parent = if kind == 0 { None } else { Some(top()) };
        let siblings = labeled_scope(parent.as_ref(), existing);
        let (position, at) = match kind {
            0 => (Position::Root, existing),
            1 => (Position::FirstChildOf(top()), 0),
            2 => (Position::LastChildOf(top()), existing),
            3 => {
                let i = pick.index(existing);
                (Position::Before(siblings[i].clone()), i)
            }
            _ => {
                let i = pick.index(existing);
                (Position::After(siblings[i].clone()), i + 1)
            }
        };

        let mut rows = siblings.clone();
        rows.extend(parent.clone());
        let store = MemoryStore::from_snapshot(DescendantPolicy::Cascade, rows);

        let planner = UpdatePlanner::new(abc()).unwrap();
        let plan = planner.plan(&position, &siblings, count).unwrap();
        prop_assert_eq!(plan.insertion_points.len(), count);
        prop_assert!(plan.renames.iter().all(|r| r.old != r.new));

        store.rename_all(&plan.renames).unwrap();
        store.insert_all(plan.insertion_points.clone()).unwrap();

        let mut expected: Vec<Path> = siblings
            .iter()
            .map(|s| plan.renamed(s).unwrap_or(s).clone())
            .collect();
        for (k, point) in plan.insertion_points.iter().enumerate() {
            expected.insert(at + k, point.clone());
        }

        let actual = store.siblings(&position.scope()).unwrap();
        let width = actual[0].last_label().len();
        prop_assert!(actual.iter().all(|p| p.last_label().len() == width));
        prop_assert_eq!(actual, expected);
    }

    /// Appending within the current width's capacity writes nothing.
    #[test]
    fn append_with_room_renames_nothing(existing in 0usize..40, count in 1usize..10) {
        let labeler = Labeler::with_alphabet(abc());
        prop_assume!(labeler.width_for(existing) == labeler.width_for(existing + count));

        let siblings = labeled_scope(Some(&top()), existing);
        let plan = UpdatePlanner::new(abc())
            .unwrap()
            .plan(&Position::LastChildOf(top()), &siblings, count)
            .unwrap();

        prop_assert!(plan.is_append_only());
        prop_assert_eq!(plan.insertion_points.len(), count);
    }

    /// A reference that is not in the scope is always reported.
    #[test]
    fn missing_reference_is_an_error(existing in 0usize..20, before in any::<bool>()) {
        let siblings = labeled_scope(Some(&top()), existing);
        let stale = top().child("zz").unwrap();
        let position = if before {
            Position::Before(stale.clone())
        } else {
            Position::After(stale.clone())
        };

        let result = UpdatePlanner::new(abc()).unwrap().plan(&position, &siblings, 1);
        prop_assert_eq!(result, Err(PlanError::ReferenceNotFound(stale)));
    }
}

#[test]
fn first_root_needs_no_renames() {
    let plan = UpdatePlanner::default().plan(&Position::Root, &[], 1).unwrap();
    assert!(plan.renames.is_empty());
    assert_eq!(plan.insertion_points, vec![Path::new("-").unwrap()]);
}

#[test]
fn codec_rejects_values_past_capacity() {
    let codec = PaddedCodec::modern(3).unwrap();
    assert_eq!(
        codec.encode(262_144),
        Err(CodecError::OutOfRange {
            value: 262_144,
            max: 262_143,
        })
    );
}
