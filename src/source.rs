// src/source.rs
//! Loading of the candidate and reference buffers.
//!
//! This is the only place that touches the filesystem on behalf of the
//! comparison engine. A missing file is reported as [`SleuthError::NotFound`]
//! so callers can tell it apart from other I/O failures.

use crate::error::{Result, SleuthError};
use crate::lang::{Dialect, Lang};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A source file held in memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
}

impl SourceFile {
    /// Reads a UTF-8 file from disk.
    ///
    /// # Errors
    /// `NotFound` if the path does not exist, `Decode` if it is not UTF-8,
    /// `Io` for anything else.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SleuthError::NotFound(path.to_path_buf()),
            _ => SleuthError::Io {
                source,
                path: path.to_path_buf(),
            },
        })?;
        let text = String::from_utf8(bytes).map_err(|_| SleuthError::Decode(path.to_path_buf()))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Wraps an in-memory buffer. The path only drives language detection.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn lang(&self) -> Option<Lang> {
        Lang::from_path(&self.path)
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        Dialect::from_path(&self.path)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}
