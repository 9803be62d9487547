//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls into core or engine to do the work
//! 3. Formats and displays output (text, or JSON with `--json`)
//!
//! # Async Commands
//!
//! `plan` goes through the async store API. The dispatch function stays
//! synchronous; the handler owns a short-lived tokio runtime.

mod codec;
mod config_cmd;
mod label;
mod plan;

pub use codec::{decode, encode};
pub use config_cmd::show as config_show;
pub use label::label;
pub use plan::plan;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Label { items } => label::label(ctx, &items),
        Command::Encode { value, length } => codec::encode(ctx, value, length),
        Command::Decode { value, length } => codec::decode(ctx, &value, length),
        Command::Plan {
            position,
            of,
            count,
            siblings,
        } => plan::plan(ctx, position, of.as_deref(), count, siblings),
        Command::Config => config_cmd::show(ctx),
    }
}
