// src/matrix.rs
//! One reference against many candidates, every strategy, with timings.

use crate::engine::{Detector, Method};
use crate::error::Result;
use crate::source::SourceFile;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Extensions picked up when a candidate argument is a directory.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "h", "cc", "cpp", "hpp", "cs", "java", "go", "js", "jsx", "mjs", "ts", "tsx", "rs", "py",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixOptions {
    /// Runs per method; timings are averaged over them.
    pub repeat: usize,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self { repeat: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodScore {
    pub method: Method,
    pub score: Option<f64>,
    pub mean_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub candidate: String,
    pub scores: Vec<MethodScore>,
    /// Mean of the methods that produced a score.
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    pub reference: String,
    pub repeat: usize,
    pub rows: Vec<MatrixRow>,
}

/// Expands directories into the source files below them, sorted by path.
/// Plain file arguments are kept as given, even without a known extension.
///
/// # Errors
/// Returns an error if a directory cannot be walked.
pub fn collect_candidates(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if !path.is_dir() {
            out.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && is_source(entry.path()) {
                out.push(entry.into_path());
            }
        }
    }
    Ok(out)
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}

/// Compares every candidate with `reference`. Rows keep candidate order.
///
/// # Errors
/// Returns an error if a candidate cannot be loaded. A strategy that fails on
/// a loaded file is recorded in its row instead.
pub fn run(
    detector: &Detector,
    reference: &SourceFile,
    candidates: &[PathBuf],
    options: MatrixOptions,
) -> Result<Matrix> {
    let repeat = options.repeat.max(1);
    let rows = candidates
        .par_iter()
        .map(|path| {
            let candidate = SourceFile::load(path)?;
            Ok(row(detector, &candidate, reference, repeat))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Matrix {
        reference: reference.display_name(),
        repeat,
        rows,
    })
}

fn row(detector: &Detector, candidate: &SourceFile, reference: &SourceFile, repeat: usize) -> MatrixRow {
    let scores: Vec<MethodScore> = Method::ALL
        .into_iter()
        .map(|method| timed(detector, candidate, reference, method, repeat))
        .collect();
    let values: Vec<f64> = scores.iter().filter_map(|s| s.score).collect();
    #[allow(clippy::cast_precision_loss)]
    let average = (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);
    MatrixRow {
        candidate: candidate.display_name(),
        scores,
        average,
    }
}

fn timed(
    detector: &Detector,
    candidate: &SourceFile,
    reference: &SourceFile,
    method: Method,
    repeat: usize,
) -> MethodScore {
    let start = Instant::now();
    let mut outcome = detector.compare(candidate, reference, method);
    for _ in 1..repeat {
        outcome = detector.compare(candidate, reference, method);
    }
    #[allow(clippy::cast_precision_loss)]
    let mean_ms = start.elapsed().as_secs_f64() * 1000.0 / repeat as f64;
    tracing::debug!(
        method = method.label(),
        candidate = %candidate.display_name(),
        mean_ms,
        "timed"
    );
    match outcome {
        Ok(v) => MethodScore {
            method,
            score: Some(v.score),
            mean_ms,
            error: None,
        },
        Err(e) => MethodScore {
            method,
            score: None,
            mean_ms,
            error: Some(e.to_string()),
        },
    }
}
