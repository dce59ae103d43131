// src/cli/handlers.rs
use crate::config::{Config, OutputFormat};
use crate::engine::{Detector, Method, Verdict};
use crate::exit::SleuthExit;
use crate::matrix::{self, MatrixOptions};
use crate::report::{self, CompareReport};
use crate::source::SourceFile;
use crate::tokenize::{function_names, Token};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

fn load(path: &Path, role: &str) -> Result<SourceFile> {
    SourceFile::load(path).with_context(|| format!("Failed to load {role} {}", path.display()))
}

fn detector(config: &Config) -> Result<Detector> {
    Detector::new(config).context("Failed to build tokenizers from config")
}

/// Handles the compare command.
///
/// # Errors
/// Returns error if a file cannot be loaded or a requested method fails.
pub fn handle_compare(
    config: &Config,
    candidate: &Path,
    reference: &Path,
    methods: &[Method],
    fail_above: Option<f64>,
) -> Result<SleuthExit> {
    if let Some(pct) = fail_above {
        if !(0.0..=100.0).contains(&pct) {
            bail!("--fail-above must be between 0 and 100, got {pct}");
        }
    }
    let detector = detector(config)?;
    let cand = load(candidate, "candidate")?;
    let refr = load(reference, "reference")?;

    let verdicts = methods
        .iter()
        .map(|m| {
            detector
                .compare(&cand, &refr, *m)
                .with_context(|| format!("{} comparison failed", m.label()))
        })
        .collect::<Result<Vec<Verdict>>>()?;

    match config.output.format {
        OutputFormat::Json => report::print_json(&CompareReport {
            candidate: &cand.display_name(),
            reference: &refr.display_name(),
            verdicts: &verdicts,
        })?,
        OutputFormat::Terminal => print!(
            "{}",
            report::format_comparison(&cand.display_name(), &refr.display_name(), &verdicts)
        ),
    }

    Ok(threshold_exit(&verdicts, fail_above))
}

fn threshold_exit(verdicts: &[Verdict], fail_above: Option<f64>) -> SleuthExit {
    let Some(pct) = fail_above else {
        return SleuthExit::Success;
    };
    match verdicts.iter().find(|v| v.score > pct) {
        Some(v) => {
            eprintln!(
                "{} {} score {:.2}% is above {pct}%",
                "threshold:".red().bold(),
                v.method.label(),
                v.score
            );
            SleuthExit::ThresholdExceeded
        }
        None => SleuthExit::Success,
    }
}

/// Handles the matrix command.
///
/// # Errors
/// Returns error if the reference or a candidate cannot be loaded.
pub fn handle_matrix(
    config: &Config,
    reference: &Path,
    candidates: &[PathBuf],
    repeat: usize,
) -> Result<SleuthExit> {
    let detector = detector(config)?;
    let refr = load(reference, "reference")?;
    let files = matrix::collect_candidates(candidates).context("Failed to collect candidates")?;
    if files.is_empty() {
        bail!("No candidate source files found");
    }
    let result = matrix::run(&detector, &refr, &files, MatrixOptions { repeat })
        .context("Failed to load candidate")?;

    match config.output.format {
        OutputFormat::Json => report::print_json(&result)?,
        OutputFormat::Terminal => print!("{}", report::format_matrix(&result)),
    }
    Ok(SleuthExit::Success)
}

#[derive(Serialize)]
struct TokensReport<'a> {
    file: &'a str,
    symbols: String,
    tokens: &'a [Token],
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<String>>,
}

/// Handles the tokens command.
///
/// # Errors
/// Returns error if the file cannot be loaded.
pub fn handle_tokens(config: &Config, file: &Path, explain: bool) -> Result<SleuthExit> {
    let detector = detector(config)?;
    let source = load(file, "file")?;
    let tokenizer = detector.tokenizer(source.dialect());
    let name = source.display_name();

    let (stream, trace) = if explain {
        let (stream, trace) = tokenizer.explain(source.text());
        (stream, Some(trace))
    } else {
        (tokenizer.tokenize(source.text()), None)
    };

    match config.output.format {
        OutputFormat::Json => report::print_json(&TokensReport {
            file: &name,
            symbols: stream.symbols(),
            tokens: stream.tokens(),
            functions: explain
                .then(|| function_names(source.text(), source.dialect())),
        })?,
        OutputFormat::Terminal => {
            print!(
                "{}",
                report::format_tokens(
                    &name,
                    &stream,
                    trace.as_deref(),
                    &tokenizer.config().alphabet
                )
            );
            if explain {
                let names = function_names(source.text(), source.dialect());
                if !names.is_empty() {
                    println!("\n{} {}", "functions:".dimmed(), names.join(", "));
                }
            }
        }
    }
    Ok(SleuthExit::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Detail;
    use crate::ngram::NgramProfile;

    fn verdict(score: f64) -> Verdict {
        Verdict {
            method: Method::Ngram,
            score,
            detail: Detail::Ngram(NgramProfile {
                width: 4,
                candidate: 0,
                reference: 0,
                shared: 0,
                union: 0,
            }),
        }
    }

    #[test]
    fn threshold_is_strictly_above() {
        assert_eq!(threshold_exit(&[verdict(50.0)], Some(50.0)), SleuthExit::Success);
        assert_eq!(
            threshold_exit(&[verdict(10.0), verdict(50.1)], Some(50.0)),
            SleuthExit::ThresholdExceeded
        );
        assert_eq!(threshold_exit(&[verdict(99.0)], None), SleuthExit::Success);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.py");
        std::fs::write(&a, "x = 1\n").unwrap();
        let err = handle_compare(&Config::default(), &a, &a, &[Method::Ngram], Some(150.0));
        assert!(err.is_err());
    }
}
