// src/report.rs
//! Console and JSON output for comparisons, matrices and token dumps.

use crate::config::TilingUnit;
use crate::engine::{Detail, Verdict};
use crate::matrix::Matrix;
use crate::tokenize::{RuleTrace, SymbolAlphabet, TokenStream};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

/// Scores at or above this are highlighted as likely derived.
pub const HIGH_SCORE: f64 = 70.0;
const MEDIUM_SCORE: f64 = 40.0;

/// JSON shape of a `compare` run.
#[derive(Debug, Serialize)]
pub struct CompareReport<'a> {
    pub candidate: &'a str,
    pub reference: &'a str,
    pub verdicts: &'a [Verdict],
}

fn paint_score(score: f64) -> String {
    let text = format!("{score:6.2}%");
    if score >= HIGH_SCORE {
        text.red().bold().to_string()
    } else if score >= MEDIUM_SCORE {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}

/// Terminal rendering of one candidate/reference comparison.
#[must_use]
pub fn format_comparison(candidate: &str, reference: &str, verdicts: &[Verdict]) -> String {
    let mut out = String::new();
    writeln!(out, "{} {}", "candidate:".dimmed(), candidate).ok();
    writeln!(out, "{} {}", "reference:".dimmed(), reference).ok();
    for v in verdicts {
        writeln!(
            out,
            "  {:<7} {}  {}",
            v.method.label().bold(),
            paint_score(v.score),
            describe(&v.detail).dimmed()
        )
        .ok();
        if let Detail::Tiling { runs, .. } = &v.detail {
            for run in runs {
                writeln!(
                    out,
                    "    {} lines {}-{} ~ {}-{} ({} units)",
                    "|".blue(),
                    run.candidate.first,
                    run.candidate.last,
                    run.reference.first,
                    run.reference.last,
                    run.len
                )
                .ok();
            }
        }
    }
    out
}

fn describe(detail: &Detail) -> String {
    match detail {
        Detail::Tree(t) => format!(
            "{} of {} nodes differ{}",
            t.mismatches,
            t.visited,
            if t.identical { ", identical" } else { "" }
        ),
        Detail::Tiling {
            unit,
            min_run,
            matched_weight,
            total_weight,
            runs,
        } => format!(
            "{matched_weight}/{total_weight} matched, {} {}, min run {min_run} {}",
            runs.len(),
            pluralize("tile", runs.len()),
            match unit {
                TilingUnit::Lines => "lines",
                TilingUnit::Symbols => "symbols",
            }
        ),
        Detail::Ngram(p) => format!(
            "{}/{} shared {}-grams ({} vs {})",
            p.shared, p.union, p.width, p.candidate, p.reference
        ),
    }
}

/// Terminal rendering of a matrix run, one row per candidate.
#[must_use]
pub fn format_matrix(matrix: &Matrix) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{} {} ({} {})",
        "reference:".dimmed(),
        matrix.reference,
        matrix.repeat,
        pluralize("run", matrix.repeat)
    )
    .ok();
    for row in &matrix.rows {
        writeln!(out, "{}", row.candidate.bold()).ok();
        for s in &row.scores {
            if let Some(score) = s.score {
                writeln!(
                    out,
                    "  {:<7} {}  {:>9.3} ms",
                    s.method.label(),
                    paint_score(score),
                    s.mean_ms
                )
                .ok();
            } else {
                writeln!(
                    out,
                    "  {:<7} {}  {}",
                    s.method.label(),
                    "    n/a".dimmed(),
                    s.error.as_deref().unwrap_or("no score").red()
                )
                .ok();
            }
        }
        if let Some(avg) = row.average {
            writeln!(out, "  {:<7} {}", "average", paint_score(avg)).ok();
        }
    }
    out
}

/// Symbol stream of a file, optionally with the per-rule trace.
#[must_use]
pub fn format_tokens(
    path: &str,
    stream: &TokenStream,
    trace: Option<&[RuleTrace]>,
    alphabet: &SymbolAlphabet,
) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{} {} ({} {})",
        "file:".dimmed(),
        path,
        stream.len(),
        pluralize("token", stream.len())
    )
    .ok();
    writeln!(out, "{}", stream.symbols()).ok();

    let Some(trace) = trace else {
        return out;
    };
    writeln!(out).ok();
    for step in trace.iter().filter(|s| !s.emitted.is_empty()) {
        let symbols: String = step.emitted.iter().map(|t| t.symbol()).collect();
        writeln!(out, "  {:<28} {}", step.rule.cyan(), symbols).ok();
        for token in &step.emitted {
            let label = alphabet
                .category(token.symbol())
                .map_or("?", |c| c.label());
            writeln!(
                out,
                "    {} {} {}..{}",
                token.symbol(),
                label.dimmed(),
                token.start(),
                token.end()
            )
            .ok();
        }
    }
    out
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Prints a serializable object as JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{LineRange, Method, SharedRun};
    use crate::ngram::NgramProfile;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn comparison_lists_tiles_as_line_ranges() {
        plain();
        let verdicts = vec![Verdict {
            method: Method::Tiling,
            score: 50.0,
            detail: Detail::Tiling {
                unit: TilingUnit::Lines,
                min_run: 4,
                matched_weight: 10,
                total_weight: 20,
                runs: vec![SharedRun {
                    candidate: LineRange { first: 3, last: 8 },
                    reference: LineRange { first: 10, last: 15 },
                    len: 6,
                }],
            },
        }];
        let text = format_comparison("a.py", "b.py", &verdicts);
        assert!(text.contains("tiling"));
        assert!(text.contains(" 50.00%"));
        assert!(text.contains("lines 3-8 ~ 10-15 (6 units)"));
        assert!(text.contains("1 tile,"));
    }

    #[test]
    fn ngram_detail_names_the_width() {
        plain();
        let detail = Detail::Ngram(NgramProfile {
            width: 4,
            candidate: 5,
            reference: 6,
            shared: 3,
            union: 8,
        });
        assert_eq!(describe(&detail), "3/8 shared 4-grams (5 vs 6)");
    }

    #[test]
    fn verdicts_serialize_with_kind_tag() {
        let v = Verdict {
            method: Method::Ngram,
            score: 100.0,
            detail: Detail::Ngram(NgramProfile {
                width: 4,
                candidate: 1,
                reference: 1,
                shared: 1,
                union: 1,
            }),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["method"], "ngram");
        assert_eq!(json["detail"]["kind"], "ngram");
        assert_eq!(json["detail"]["shared"], 1);
    }
}
