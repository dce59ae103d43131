// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SleuthError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("File is not valid UTF-8: {0}")]
    Decode(PathBuf),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid symbol alphabet: {0}")]
    Alphabet(String),

    #[error("Invalid config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl SleuthError {
    /// True for failures caused by the caller's input rather than by the engine.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Decode(_) | Self::UnsupportedLanguage(_) | Self::Io { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SleuthError>;

// Allow `?` on std::io::Error by converting to SleuthError::Io with unknown path.
impl From<std::io::Error> for SleuthError {
    fn from(source: std::io::Error) -> Self {
        SleuthError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for SleuthError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map_or_else(|| PathBuf::from("<unknown>"), PathBuf::from);
        match e.into_io_error() {
            Some(source) => SleuthError::Io { source, path },
            None => SleuthError::NotFound(path),
        }
    }
}
