//! engine
//!
//! Planning and applying sibling insertions against a store.
//!
//! # Architecture
//!
//! The engine follows a Fetch → Plan → Apply lifecycle:
//!
//! 1. **Fetch**: read the ordered sibling scope from a [`store::TreeStore`]
//! 2. **Plan**: compute renames and insertion points ([`planner`])
//! 3. **Apply**: write the renames as one atomic batch
//!
//! The planner is pure; only [`insert`] talks to a store.
//!
//! # Modules
//!
//! - [`planner`] - Rename/insertion-point computation
//! - [`store`] - Storage collaborator traits and policies
//! - [`memory`] - In-memory store enforcing parent and descendant rules
//! - [`insert`] - Fetch/plan/apply orchestration and tree creation

pub mod insert;
pub mod memory;
pub mod planner;
pub mod store;

pub use insert::{
    create_tree, create_tree_async, move_nodes, move_nodes_async, plan_insert, plan_insert_async,
    TreeNode,
};
pub use planner::{InsertPlan, PlanError, UpdatePlanner};
pub use store::{AsyncTreeStore, DescendantPolicy, StoreError, TreeStore};
