//! ltreework - Order-maintaining labels for materialized tree paths
//!
//! Every node in a tree is addressed by a dot-separated path of labels
//! (`Top.Science.Astronomy`), and siblings sort by label. Inserting a node
//! at an arbitrary position means choosing a label that sorts in the right
//! place, and sometimes relabeling neighbours to make room.
//!
//! # Architecture
//!
//! - [`core`] - Paths, alphabets, the labeler, the padded codec, positions, config
//! - [`engine`] - The update planner and the fetch/plan/apply lifecycle
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Labels within a scope have one width, so string order is sibling order
//! 2. Planning is pure; renames are applied as a single atomic batch
//! 3. Only siblings whose label changes are written
//! 4. A stale reference is an error, never an empty plan

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
