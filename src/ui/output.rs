//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, output is machine-readable JSON.

use std::fmt::Display;

use crate::engine::planner::InsertPlan;

/// How much commentary accompanies a command's result.
///
/// Diagnostics are not covered here; `--debug` raises the `tracing` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Results and errors only
    Quiet,
    /// Results plus notes and warnings
    #[default]
    Normal,
}

impl Verbosity {
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    pub fn is_quiet(self) -> bool {
        self == Verbosity::Quiet
    }
}

/// Print a note on stdout, unless quiet.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        println!("{}", message);
    }
}

/// Print a result line. Shown even in quiet mode, since it is the
/// command's output rather than commentary.
pub fn result(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning on stderr, unless quiet.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        eprintln!("warning: {}", message);
    }
}

/// Format `(label, item)` pairs, one tab-separated pair per line.
pub fn format_labels<T: Display>(pairs: &[(String, T)]) -> String {
    pairs
        .iter()
        .map(|(label, item)| format!("{}\t{}", label, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a plan as `rename` and `insert` lines.
pub fn format_plan(plan: &InsertPlan) -> String {
    plan.renames
        .iter()
        .map(|r| format!("rename {}", r))
        .chain(plan.insertion_points.iter().map(|p| format!("insert {}", p)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Path, Rename};

    #[test]
    fn quiet_flag_selects_verbosity() {
        assert!(Verbosity::from_quiet(true).is_quiet());
        assert_eq!(Verbosity::from_quiet(false), Verbosity::Normal);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn labels_are_tab_separated() {
        let pairs = vec![("a".to_string(), "x"), ("b".to_string(), "y")];
        assert_eq!(format_labels(&pairs), "a\tx\nb\ty");
    }

    #[test]
    fn plan_lists_renames_before_inserts() {
        let plan = InsertPlan {
            renames: vec![Rename::new(
                Path::new("Top.A").unwrap(),
                Path::new("Top.-").unwrap(),
            )],
            insertion_points: vec![Path::new("Top.0").unwrap()],
        };
        assert_eq!(format_plan(&plan), "rename Top.A -> Top.-\ninsert Top.0");
    }
}
