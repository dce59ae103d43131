// src/exit.rs
//! Standardized process exit codes for `sourcesleuth`.
//!
//! Provides a stable contract for scripts and CI gates.

use crate::error::SleuthError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SleuthExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (config, regex, parser).
    Error = 1,
    /// Input could not be used (missing file, not UTF-8, unsupported language).
    InvalidInput = 2,
    /// A similarity score exceeded the `--fail-above` threshold.
    ThresholdExceeded = 3,
}

impl SleuthExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps a failed run to an exit code, looking through `anyhow` context
    /// for the typed engine error.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<SleuthError>() {
            Some(e) if e.is_input_error() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for SleuthExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
