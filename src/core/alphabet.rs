//! core::alphabet
//!
//! Symbol sets for generated labels.
//!
//! # Presets
//!
//! - [`Alphabet::modern`] - `-`, digits, uppercase, `_`, lowercase (64 symbols).
//!   Accepted by PostgreSQL 16 and later.
//! - [`Alphabet::legacy`] - digits, uppercase, `_`, lowercase (63 symbols).
//!   Accepted by PostgreSQL 15 and earlier.
//!
//! Both presets are sorted by code point, so counting in the alphabet's
//! base yields strings in lexicographic order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MODERN_SYMBOLS: &str = "-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
const LEGACY_SYMBOLS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Errors from alphabet validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("alphabet must contain at least 2 characters, got {0}")]
    TooShort(usize),

    #[error("alphabet must contain unique characters, '{0}' repeats")]
    Duplicate(char),

    #[error("alphabet must be sorted, '{before}' comes before '{after}'")]
    Unsorted { before: char, after: char },

    #[error("character '{symbol}' is not allowed in {syntax} labels")]
    InvalidForSyntax { symbol: char, syntax: LabelSyntax },
}

/// An ordered set of unique symbols.
///
/// Its length is the base used by both the labeler and the padded codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Create an alphabet from at least two unique symbols.
    ///
    /// The symbols need not be sorted; use [`Alphabet::sorted`] where
    /// lexicographic order of generated labels matters.
    ///
    /// # Errors
    ///
    /// `AlphabetError::TooShort` or `AlphabetError::Duplicate`.
    pub fn new(symbols: &str) -> Result<Self, AlphabetError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() < 2 {
            return Err(AlphabetError::TooShort(symbols.len()));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(AlphabetError::Duplicate(*c));
            }
        }
        Ok(Self { symbols })
    }

    /// Create an alphabet whose symbols are in ascending order.
    pub fn sorted(symbols: &str) -> Result<Self, AlphabetError> {
        let alphabet = Self::new(symbols)?;
        alphabet.check_sorted()?;
        Ok(alphabet)
    }

    /// The 64-symbol preset for current PostgreSQL ltree labels.
    pub fn modern() -> Self {
        Self {
            symbols: MODERN_SYMBOLS.chars().collect(),
        }
    }

    /// The 63-symbol preset for PostgreSQL 15 and earlier (no `-`).
    pub fn legacy() -> Self {
        Self {
            symbols: LEGACY_SYMBOLS.chars().collect(),
        }
    }

    /// Number of symbols.
    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The lowest symbol, used for padding.
    pub fn first(&self) -> char {
        self.symbols[0]
    }

    /// Position of `symbol` in the alphabet.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&c| c == symbol)
    }

    pub fn is_sorted(&self) -> bool {
        self.check_sorted().is_ok()
    }

    /// Check that symbols are in ascending order.
    pub fn check_sorted(&self) -> Result<(), AlphabetError> {
        match self.symbols.windows(2).find(|w| w[0] > w[1]) {
            Some(w) => Err(AlphabetError::Unsorted {
                before: w[0],
                after: w[1],
            }),
            None => Ok(()),
        }
    }

    /// Check that every symbol is legal under `syntax`.
    pub fn check_syntax(&self, syntax: LabelSyntax) -> Result<(), AlphabetError> {
        match self.symbols.iter().find(|&&c| !syntax.allows(c)) {
            Some(&symbol) => Err(AlphabetError::InvalidForSyntax { symbol, syntax }),
            None => Ok(()),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::modern()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Which label character rules the storage backend enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSyntax {
    /// `[A-Za-z0-9_-]`, at most 1000 characters.
    #[default]
    Modern,
    /// `[A-Za-z0-9_]`, at most 255 characters.
    Legacy,
}

impl LabelSyntax {
    /// Longest label accepted.
    pub fn max_len(self) -> usize {
        match self {
            LabelSyntax::Modern => 1000,
            LabelSyntax::Legacy => 255,
        }
    }

    /// True if `c` may appear in a label.
    pub fn allows(self, c: char) -> bool {
        match self {
            LabelSyntax::Modern => c.is_ascii_alphanumeric() || c == '_' || c == '-',
            LabelSyntax::Legacy => c.is_ascii_alphanumeric() || c == '_',
        }
    }

    /// True if `label` is non-empty, short enough, and uses legal characters.
    pub fn is_valid_label(self, label: &str) -> bool {
        !label.is_empty() && label.len() <= self.max_len() && label.chars().all(|c| self.allows(c))
    }

    /// The default alphabet for this syntax.
    pub fn alphabet(self) -> Alphabet {
        match self {
            LabelSyntax::Modern => Alphabet::modern(),
            LabelSyntax::Legacy => Alphabet::legacy(),
        }
    }
}

impl std::fmt::Display for LabelSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelSyntax::Modern => write!(f, "modern"),
            LabelSyntax::Legacy => write!(f, "legacy"),
        }
    }
}
