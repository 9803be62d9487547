//! core
//!
//! Domain types and pure algorithms for ordered materialized paths.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Path, Rename
//! - [`alphabet`] - Symbol sets and label syntax rules
//! - [`labeler`] - Fixed-width lexicographic label generation
//! - [`codec`] - Order-preserving integer/string codec
//! - [`position`] - Relative insertion points and sibling scopes
//! - [`rewrite`] - Integer-keyed child rewrites
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at construction time
//! - Nothing here performs I/O except config loading
//! - All computation is deterministic

pub mod alphabet;
pub mod codec;
pub mod config;
pub mod labeler;
pub mod position;
pub mod rewrite;
pub mod types;
