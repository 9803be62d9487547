//! plan command - Show the renames and insertion points for an insert
//!
//! The sibling scope comes from `--sibling` flags, or one path per line on
//! stdin when none are given. Blank lines and `#` comments are skipped.

use std::io::{self, BufRead, IsTerminal};

use anyhow::{bail, Context as _, Result};
use tracing::debug;

use crate::cli::args::PositionKind;
use crate::cli::Context;
use crate::core::alphabet::LabelSyntax;
use crate::core::types::{Path, PathError};
use crate::engine::insert::plan_insert_async;
use crate::engine::memory::MemoryStore;
use crate::engine::store::DescendantPolicy;
use crate::ui::output;

/// Plan inserting `count` nodes at the given position.
pub fn plan(
    ctx: &Context,
    kind: PositionKind,
    of: Option<&str>,
    count: usize,
    siblings: Vec<String>,
) -> Result<()> {
    let position = kind.resolve(of)?;
    let syntax = ctx.config.label_syntax();
    if let Some(reference) = position.reference() {
        reference
            .check_syntax(syntax)
            .with_context(|| format!("Invalid reference path '{}'", reference))?;
    }
    let planner = ctx.config.planner().context("Invalid label alphabet")?;

    let raw = if siblings.is_empty() {
        read_stdin_paths()?
    } else {
        siblings
    };
    let paths = raw
        .iter()
        .map(|s| {
            parse_path(s, syntax).with_context(|| format!("Invalid sibling path '{}'", s))
        })
        .collect::<Result<Vec<_>>>()?;

    let scope = position.scope();
    let outside = paths.iter().filter(|p| !scope.contains(p)).count();
    if outside > 0 {
        output::warn(
            format!("ignoring {} path(s) outside {}", outside, scope),
            ctx.verbosity,
        );
    }
    debug!(position = %position, siblings = paths.len() - outside, count, "planning");

    let store = MemoryStore::from_snapshot(DescendantPolicy::Cascade, paths);
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let plan = runtime.block_on(plan_insert_async(&store, &planner, &position, count))?;

    if ctx.json {
        output::result(serde_json::to_string_pretty(&plan)?);
    } else {
        output::result(output::format_plan(&plan));
    }
    Ok(())
}

fn parse_path(raw: &str, syntax: LabelSyntax) -> Result<Path, PathError> {
    let path = Path::new(raw)?;
    path.check_syntax(syntax)?;
    Ok(path)
}

fn read_stdin_paths() -> Result<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }

    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.chars().any(char::is_whitespace) {
            bail!("Invalid sibling path '{}': contains whitespace", line);
        }
        lines.push(line.to_string());
    }
    Ok(lines)
}
