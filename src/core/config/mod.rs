//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Alphabet and widths are configuration inputs, never discovered at
//! runtime. Each [`Config`] owns its values, so several configurations can
//! coexist (for example, tests exercising different alphabets in parallel).
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$LTREEWORK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/ltreework/config.toml`
//! 3. `~/.ltreework/config.toml`
//!
//! A missing file is not an error; defaults are used.
//!
//! # Example
//!
//! ```
//! use ltreework::core::config::Config;
//!
//! let config = Config::from_toml_str("alphabet = \"abc\"").unwrap();
//! let planner = config.planner().unwrap();
//! assert_eq!(planner.labeler().alphabet().base(), 3);
//! assert_eq!(config.codec_length(), 5);
//! ```

pub mod schema;

pub use schema::{CodecConfig, LabelConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::alphabet::{Alphabet, LabelSyntax};
use crate::core::codec::PaddedCodec;
use crate::core::labeler::Labeler;
use crate::engine::planner::UpdatePlanner;

/// Default width of padded codec values.
pub const DEFAULT_CODEC_LENGTH: usize = 5;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the file (all optional)
    pub file: LabelConfig,
    /// Path the values were loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find()? {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: LabelConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: LabelConfig = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(Self { file, path: None })
    }

    /// Locate the first existing config file.
    fn find() -> Result<Option<PathBuf>, ConfigError> {
        // 1. $LTREEWORK_CONFIG
        if let Ok(path) = std::env::var("LTREEWORK_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        // 2. $XDG_CONFIG_HOME/ltreework/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("ltreework/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        // 3. ~/.ltreework/config.toml
        if let Ok(path) = Self::default_path() {
            if path.exists() {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// The canonical config location, `~/.ltreework/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".ltreework/config.toml"))
    }

    /// Path the configuration was loaded from.
    pub fn source_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Label syntax. Defaults to modern.
    pub fn label_syntax(&self) -> LabelSyntax {
        self.file.label_syntax.unwrap_or_default()
    }

    /// Label alphabet. Defaults to the syntax's preset.
    pub fn alphabet(&self) -> Result<Alphabet, ConfigError> {
        match &self.file.alphabet {
            Some(symbols) => Alphabet::sorted(symbols)
                .map_err(|e| ConfigError::InvalidValue(format!("alphabet: {}", e))),
            None => Ok(self.label_syntax().alphabet()),
        }
    }

    /// Codec width. Defaults to [`DEFAULT_CODEC_LENGTH`].
    pub fn codec_length(&self) -> usize {
        self.file
            .codec
            .as_ref()
            .and_then(|c| c.length)
            .unwrap_or(DEFAULT_CODEC_LENGTH)
    }

    /// Codec alphabet. Defaults to the label alphabet.
    pub fn codec_alphabet(&self) -> Result<Alphabet, ConfigError> {
        match self.file.codec.as_ref().and_then(|c| c.alphabet.as_deref()) {
            Some(symbols) => Alphabet::sorted(symbols)
                .map_err(|e| ConfigError::InvalidValue(format!("codec.alphabet: {}", e))),
            None => self.alphabet(),
        }
    }

    pub fn labeler(&self) -> Result<Labeler, ConfigError> {
        Ok(Labeler::with_alphabet(self.alphabet()?))
    }

    pub fn planner(&self) -> Result<UpdatePlanner, ConfigError> {
        UpdatePlanner::new(self.alphabet()?).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Codec with an explicit width, or the configured one when `None`.
    pub fn codec(&self, length: Option<usize>) -> Result<PaddedCodec, ConfigError> {
        let length = length.unwrap_or_else(|| self.codec_length());
        PaddedCodec::with_alphabet(self.codec_alphabet()?, length)
            .map_err(|e| ConfigError::InvalidValue(format!("codec: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.label_syntax(), LabelSyntax::Modern);
        assert_eq!(config.alphabet().unwrap(), Alphabet::modern());
        assert_eq!(config.codec_length(), DEFAULT_CODEC_LENGTH);
        assert_eq!(config.codec(None).unwrap().max_value(), 64u64.pow(5) - 1);
        assert!(config.source_path().is_none());
    }

    #[test]
    fn legacy_syntax_switches_default_alphabet() {
        let config = Config::from_toml_str("label_syntax = \"legacy\"").unwrap();
        assert_eq!(config.alphabet().unwrap(), Alphabet::legacy());
    }

    #[test]
    fn codec_alphabet_falls_back_to_label_alphabet() {
        let config = Config::from_toml_str(
            r#"
alphabet = "01"

[codec]
length = 3
"#,
        )
        .unwrap();
        let codec = config.codec(None).unwrap();
        assert_eq!(codec.max_value(), 7);
        assert_eq!(config.codec(Some(2)).unwrap().max_value(), 3);
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alphabet = \"abc\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.source_path(), Some(file.path()));
        assert_eq!(config.labeler().unwrap().alphabet().base(), 3);
    }

    #[test]
    fn invalid_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alphabet = 3").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Config::load_from(Path::new("/nonexistent/ltreework.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn invalid_values_are_rejected_on_parse() {
        assert!(matches!(
            Config::from_toml_str("alphabet = \"zyx\""),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[codec]\nlength = 11"),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
