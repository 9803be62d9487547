//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <file>`: Read configuration from this file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::position::Position;
use crate::core::types::{Path, PathError};

/// ltw - order-maintaining labels for ltree paths
#[derive(Parser, Debug)]
#[command(name = "ltw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assign fixed-width, order-preserving labels to items
    Label {
        /// Items to label, in order
        items: Vec<String>,
    },

    /// Encode an integer as a fixed-width string
    Encode {
        /// Value to encode
        value: u64,

        /// Width of the encoded string (default from config)
        #[arg(long)]
        length: Option<usize>,
    },

    /// Decode a fixed-width string back to its integer
    Decode {
        /// String to decode
        value: String,

        /// Expected width (default from config)
        #[arg(long)]
        length: Option<usize>,
    },

    /// Plan an insertion into an ordered sibling scope
    #[command(after_help = "\
EXAMPLES:
    # Insert before Top.B among its siblings
    ltw plan before --of Top.B --sibling Top.A --sibling Top.B --sibling Top.C

    # Read the current scope from stdin
    printf 'Top.A\\nTop.B\\n' | ltw plan last-child --of Top --count 2

Siblings outside the position's scope are ignored.")]
    Plan {
        /// Where to insert
        #[arg(value_enum)]
        position: PositionKind,

        /// Reference node path (required except for root)
        #[arg(long = "of", value_name = "PATH")]
        of: Option<String>,

        /// Number of nodes to insert
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Current sibling paths; read from stdin when omitted
        #[arg(long = "sibling", value_name = "PATH")]
        siblings: Vec<String>,
    },

    /// Show the effective configuration
    Config,
}

/// Position kinds accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKind {
    Root,
    FirstChild,
    LastChild,
    Before,
    After,
}

/// Errors building a position from arguments.
#[derive(Debug, thiserror::Error)]
pub enum PositionArgError {
    #[error("--of is required for '{0:?}' positions")]
    MissingReference(PositionKind),

    #[error("--of is not accepted for root positions")]
    UnexpectedReference,

    #[error(transparent)]
    Path(#[from] PathError),
}

impl PositionKind {
    /// Combine with the `--of` argument into a [`Position`].
    pub fn resolve(self, of: Option<&str>) -> Result<Position, PositionArgError> {
        let reference = of.map(Path::new).transpose()?;
        match (self, reference) {
            (PositionKind::Root, None) => Ok(Position::Root),
            (PositionKind::Root, Some(_)) => Err(PositionArgError::UnexpectedReference),
            (kind, None) => Err(PositionArgError::MissingReference(kind)),
            (PositionKind::FirstChild, Some(p)) => Ok(Position::FirstChildOf(p)),
            (PositionKind::LastChild, Some(p)) => Ok(Position::LastChildOf(p)),
            (PositionKind::Before, Some(p)) => Ok(Position::Before(p)),
            (PositionKind::After, Some(p)) => Ok(Position::After(p)),
        }
    }
}
