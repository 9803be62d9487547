//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Values are validated after parsing: the label alphabet must be a sorted,
//! duplicate-free set of symbols that the chosen label syntax accepts, and
//! the codec length must be at least 1 and small enough that every value
//! fits in a u64.

use serde::{Deserialize, Serialize};

use super::{ConfigError, DEFAULT_CODEC_LENGTH};
use crate::core::alphabet::{Alphabet, LabelSyntax};
use crate::core::codec::PaddedCodec;

/// Label configuration.
///
/// # Example
///
/// ```toml
/// label_syntax = "legacy"
/// alphabet = "0123456789"
///
/// [codec]
/// length = 4
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// Label rules of the target database ("modern" or "legacy")
    pub label_syntax: Option<LabelSyntax>,

    /// Symbols used for generated labels, ascending
    pub alphabet: Option<String>,

    /// Padded integer codec settings
    pub codec: Option<CodecConfig>,
}

/// Padded integer codec settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Fixed width of encoded values
    pub length: Option<usize>,

    /// Codec symbols; defaults to the label alphabet
    pub alphabet: Option<String>,
}

impl LabelConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let syntax = self.label_syntax.unwrap_or_default();

        if let Some(symbols) = &self.alphabet {
            check_alphabet("alphabet", symbols, syntax)?;
        }

        if let Some(codec) = &self.codec {
            if codec.length == Some(0) {
                return Err(ConfigError::InvalidValue(
                    "codec.length must be at least 1".into(),
                ));
            }
            if let Some(symbols) = &codec.alphabet {
                check_alphabet("codec.alphabet", symbols, syntax)?;
            }
        }

        self.check_codec_capacity(syntax)
    }

    /// The codec's `base^length - 1` must fit in a u64.
    fn check_codec_capacity(&self, syntax: LabelSyntax) -> Result<(), ConfigError> {
        let codec = self.codec.clone().unwrap_or_default();
        let length = codec.length.unwrap_or(DEFAULT_CODEC_LENGTH);
        let alphabet = match codec.alphabet.as_deref().or(self.alphabet.as_deref()) {
            Some(symbols) => Alphabet::sorted(symbols)
                .map_err(|e| ConfigError::InvalidValue(format!("codec.alphabet: {}", e)))?,
            None => syntax.alphabet(),
        };
        PaddedCodec::with_alphabet(alphabet, length)
            .map(|_| ())
            .map_err(|e| ConfigError::InvalidValue(format!("codec.length: {}", e)))
    }
}

fn check_alphabet(key: &str, symbols: &str, syntax: LabelSyntax) -> Result<(), ConfigError> {
    Alphabet::sorted(symbols)
        .and_then(|alphabet| alphabet.check_syntax(syntax))
        .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", key, e)))
}
