// src/config/types.rs
use crate::tokenize::SymbolAlphabet;
use crate::tree::CompareOptions;
use serde::{Deserialize, Serialize};

/// Contents of `sleuth.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tiling: TilingConfig,
    #[serde(default)]
    pub ngram: NgramConfig,
    #[serde(default)]
    pub tree: CompareOptions,
    #[serde(default)]
    pub tokenizer: TokenizerSection,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Element the tiling matcher runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TilingUnit {
    /// Source lines, compared trimmed.
    #[default]
    Lines,
    /// The tokenizer's symbol stream.
    Symbols,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilingConfig {
    #[serde(default = "default_min_run")]
    pub min_run: usize,
    #[serde(default)]
    pub unit: TilingUnit,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            min_run: default_min_run(),
            unit: TilingUnit::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramConfig {
    #[serde(default = "default_width")]
    pub width: usize,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
        }
    }
}

/// Overrides for the tokenizer. Unset keyword lists keep the dialect's own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerSection {
    #[serde(default)]
    pub int_types: Option<Vec<String>>,
    #[serde(default)]
    pub char_types: Option<Vec<String>>,
    #[serde(default)]
    pub float_types: Option<Vec<String>>,
    #[serde(default)]
    pub alphabet: SymbolAlphabet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

const fn default_min_run() -> usize { 4 }
const fn default_width() -> usize { 4 }
