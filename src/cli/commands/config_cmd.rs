//! config command - Show the effective configuration

use anyhow::{Context as _, Result};
use serde_json::json;

use crate::cli::Context;
use crate::core::config::{CodecConfig, LabelConfig};
use crate::ui::output;

/// Print the configuration with defaults filled in.
pub fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let alphabet = config.alphabet().context("Invalid label alphabet")?;
    let codec_alphabet = config
        .codec_alphabet()
        .context("Invalid codec alphabet")?;

    let effective = LabelConfig {
        label_syntax: Some(config.label_syntax()),
        alphabet: Some(alphabet.to_string()),
        codec: Some(CodecConfig {
            length: Some(config.codec_length()),
            alphabet: Some(codec_alphabet.to_string()),
        }),
    };
    let source = config.source_path().map(|p| p.display().to_string());

    if ctx.json {
        output::result(serde_json::to_string_pretty(&json!({
            "source": source,
            "config": effective,
        }))?);
        return Ok(());
    }

    match &source {
        Some(path) => output::print(format!("# loaded from {}", path), ctx.verbosity),
        None => output::print("# defaults (no config file found)", ctx.verbosity),
    }
    output::result(toml::to_string(&effective)?.trim_end());
    Ok(())
}
