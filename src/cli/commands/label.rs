//! label command - Assign order-preserving labels to items

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::ui::output;

#[derive(Serialize)]
struct LabeledItem<'a> {
    label: String,
    item: &'a str,
}

/// Label `items` in order with the configured alphabet.
pub fn label(ctx: &Context, items: &[String]) -> Result<()> {
    let labeler = ctx.config.labeler().context("Invalid label alphabet")?;
    let labeled: Vec<(String, &str)> = labeler.label(items.iter().map(String::as_str)).collect();

    if ctx.json {
        let rows: Vec<LabeledItem> = labeled
            .into_iter()
            .map(|(label, item)| LabeledItem { label, item })
            .collect();
        output::result(serde_json::to_string_pretty(&rows)?);
    } else if !labeled.is_empty() {
        output::result(output::format_labels(&labeled));
    }
    Ok(())
}
