//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All CLI output goes through this module so quiet mode and JSON mode are
//! handled in one place. Diagnostics go through `tracing` instead.

pub mod output;
