//! encode/decode commands - Fixed-width integer strings

use anyhow::{Context as _, Result};
use serde_json::json;

use crate::cli::Context;
use crate::ui::output;

/// Encode `value` with the configured codec, or `length` when given.
pub fn encode(ctx: &Context, value: u64, length: Option<usize>) -> Result<()> {
    let codec = ctx.config.codec(length).context("Invalid codec settings")?;
    let encoded = codec
        .encode(value)
        .with_context(|| format!("Cannot encode {}", value))?;

    if ctx.json {
        output::result(json!({ "value": value, "encoded": encoded }));
    } else {
        output::result(encoded);
    }
    Ok(())
}

/// Decode `value` with the configured codec, or `length` when given.
pub fn decode(ctx: &Context, value: &str, length: Option<usize>) -> Result<()> {
    let codec = ctx.config.codec(length).context("Invalid codec settings")?;
    let decoded = codec
        .decode(value)
        .with_context(|| format!("Cannot decode '{}'", value))?;

    if ctx.json {
        output::result(json!({ "encoded": value, "value": decoded }));
    } else {
        output::result(decoded);
    }
    Ok(())
}
