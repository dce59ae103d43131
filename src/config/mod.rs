// src/config/mod.rs
pub mod types;

pub use self::types::{
    Config, NgramConfig, OutputConfig, OutputFormat, TilingConfig, TilingUnit, TokenizerSection,
};

use crate::error::{Result, SleuthError};
use crate::lang::Dialect;
use crate::tokenize::TokenizerConfig;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "sleuth.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `explicit`, or `sleuth.toml` from the working directory when it
    /// exists. Defaults apply when neither is present.
    ///
    /// # Errors
    /// `NotFound` if an explicit path is missing, `Config` for invalid TOML or
    /// an invalid tokenizer section.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::discover(Path::new(".")),
        }
    }

    /// Loads `dir/sleuth.toml` if present.
    ///
    /// # Errors
    /// See [`Config::load`].
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content, &path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(SleuthError::Io { source, path }),
        }
    }

    /// # Errors
    /// See [`Config::load`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SleuthError::NotFound(path.to_path_buf()),
            _ => SleuthError::Io {
                source,
                path: path.to_path_buf(),
            },
        })?;
        Self::parse(&content, path)
    }

    /// Parses TOML text; `path` is only used in error messages.
    ///
    /// # Errors
    /// `Config` if the text is not valid for this schema.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| SleuthError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate().map_err(|e| SleuthError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// # Errors
    /// `Alphabet` if the alphabet is ambiguous or a keyword list has blanks.
    pub fn validate(&self) -> Result<()> {
        self.tokenizer_config(Dialect::CFamily).validate()
    }

    /// The dialect's tokenizer settings with this file's overrides applied.
    #[must_use]
    pub fn tokenizer_config(&self, dialect: Dialect) -> TokenizerConfig {
        let section = &self.tokenizer;
        let mut config =
            TokenizerConfig::for_dialect(dialect).with_alphabet(section.alphabet.clone());
        if let Some(types) = &section.int_types {
            config.int_types.clone_from(types);
        }
        if let Some(types) = &section.char_types {
            config.char_types.clone_from(types);
        }
        if let Some(types) = &section.float_types {
            config.float_types.clone_from(types);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ScalarPolicy, SequencePolicy};

    #[test]
    fn partial_file_keeps_defaults() {
        let c = Config::parse("[tiling]\nunit = \"symbols\"\n", Path::new("t.toml")).unwrap();
        assert_eq!(c.tiling.unit, TilingUnit::Symbols);
        assert_eq!(c.tiling.min_run, 4);
        assert_eq!(c.ngram.width, 4);
        assert_eq!(c.tree.scalars, ScalarPolicy::Loose);
        assert_eq!(c.tree.sequences, SequencePolicy::Penalize);
    }

    #[test]
    fn tree_policies_parse() {
        let c = Config::parse(
            "[tree]\nscalars = \"strict\"\nsequences = \"truncate\"\n",
            Path::new("t.toml"),
        )
        .unwrap();
        assert_eq!(c.tree.scalars, ScalarPolicy::Strict);
        assert_eq!(c.tree.sequences, SequencePolicy::Truncate);
    }

    #[test]
    fn duplicate_symbols_are_rejected() {
        let err = Config::parse(
            "[tokenizer.alphabet]\ncall = \"A\"\n",
            Path::new("t.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, SleuthError::Config { .. }));
    }

    #[test]
    fn keyword_overrides_apply_to_both_dialects() {
        let c = Config::parse(
            "[tokenizer]\nint_types = [\"i32\", \"i64\"]\n",
            Path::new("t.toml"),
        )
        .unwrap();
        let tc = c.tokenizer_config(Dialect::CFamily);
        assert_eq!(tc.int_types, vec!["i32".to_string(), "i64".to_string()]);
        assert!(!tc.char_types.is_empty());
        assert_eq!(c.tokenizer_config(Dialect::Python).int_types.len(), 2);
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("none.toml"))).unwrap_err();
        assert!(matches!(err, SleuthError::NotFound(_)));
    }

    #[test]
    fn missing_default_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());
    }
}
