// src/engine.rs
//! Strategy selection over loaded files.
//!
//! The three strategies are independent; [`Detector`] only owns what they
//! need from the configuration and the compiled tokenizers.

use crate::config::{Config, TilingUnit};
use crate::error::Result;
use crate::lang::Dialect;
use crate::ngram::NgramProfile;
use crate::source::SourceFile;
use crate::tiling::{self, TileMatch};
use crate::tokenize::{TokenStream, Tokenizer};
use crate::tree::{self, TreeComparison};
use serde::Serialize;

/// A similarity strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Structural comparison of syntax trees.
    Tree,
    /// Greedy string tiling over lines or symbols.
    Tiling,
    /// Jaccard similarity of symbol n-grams.
    Ngram,
}

impl Method {
    pub const ALL: [Self; 3] = [Self::Tree, Self::Tiling, Self::Ngram];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Tiling => "tiling",
            Self::Ngram => "ngram",
        }
    }
}

/// Inclusive, 1-based line span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub first: usize,
    pub last: usize,
}

/// A committed tile located in both files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharedRun {
    pub candidate: LineRange,
    pub reference: LineRange,
    /// Run length in tiling units.
    pub len: usize,
}

/// Strategy-specific evidence behind a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Detail {
    Tree(TreeComparison),
    Tiling {
        unit: TilingUnit,
        min_run: usize,
        matched_weight: usize,
        total_weight: usize,
        runs: Vec<SharedRun>,
    },
    Ngram(NgramProfile),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub method: Method,
    /// Percentage in `[0, 100]`.
    pub score: f64,
    pub detail: Detail,
}

/// Runs comparisons with one configuration.
#[derive(Debug)]
pub struct Detector {
    config: Config,
    c_family: Tokenizer,
    python: Tokenizer,
}

impl Detector {
    /// Compiles the tokenizer for each dialect once.
    ///
    /// # Errors
    /// `Alphabet` or `Regex` if the tokenizer section is unusable.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            c_family: Tokenizer::new(&config.tokenizer_config(Dialect::CFamily))?,
            python: Tokenizer::new(&config.tokenizer_config(Dialect::Python))?,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn tokenizer(&self, dialect: Dialect) -> &Tokenizer {
        match dialect {
            Dialect::CFamily => &self.c_family,
            Dialect::Python => &self.python,
        }
    }

    #[must_use]
    pub fn tokenize(&self, file: &SourceFile) -> TokenStream {
        self.tokenizer(file.dialect()).tokenize(file.text())
    }

    /// Scores `candidate` against `reference` with one strategy.
    ///
    /// # Errors
    /// Only the tree strategy can fail: `UnsupportedLanguage` or `Parse`.
    pub fn compare(
        &self,
        candidate: &SourceFile,
        reference: &SourceFile,
        method: Method,
    ) -> Result<Verdict> {
        let verdict = match method {
            Method::Tree => self.compare_trees(candidate, reference)?,
            Method::Tiling => self.compare_tiles(candidate, reference),
            Method::Ngram => self.compare_ngrams(candidate, reference),
        };
        tracing::debug!(
            method = method.label(),
            candidate = %candidate.display_name(),
            reference = %reference.display_name(),
            score = verdict.score,
            "compared"
        );
        Ok(verdict)
    }

    /// Every strategy, in [`Method::ALL`] order.
    ///
    /// # Errors
    /// See [`Detector::compare`].
    pub fn compare_all(
        &self,
        candidate: &SourceFile,
        reference: &SourceFile,
    ) -> Result<Vec<Verdict>> {
        Method::ALL
            .into_iter()
            .map(|m| self.compare(candidate, reference, m))
            .collect()
    }

    fn compare_trees(&self, candidate: &SourceFile, reference: &SourceFile) -> Result<Verdict> {
        let a = tree::parse_source(candidate)?;
        let b = tree::parse_source(reference)?;
        let result = tree::compare(&a, &b, self.config.tree);
        Ok(Verdict {
            method: Method::Tree,
            score: result.similarity(),
            detail: Detail::Tree(result),
        })
    }

    fn compare_tiles(&self, candidate: &SourceFile, reference: &SourceFile) -> Verdict {
        let settings = self.config.tiling;
        let (tiling, runs) = match settings.unit {
            TilingUnit::Lines => {
                let t = tiling::tile_lines(candidate.text(), reference.text(), settings.min_run);
                let runs = t.matches.iter().map(line_run).collect();
                (t, runs)
            }
            TilingUnit::Symbols => {
                let c = self.tokenize(candidate);
                let r = self.tokenize(reference);
                let t = tiling::tile_symbols(&c.symbols(), &r.symbols(), settings.min_run);
                let runs = t
                    .matches
                    .iter()
                    .filter_map(|m| symbol_run(m, (candidate.text(), &c), (reference.text(), &r)))
                    .collect();
                (t, runs)
            }
        };
        Verdict {
            method: Method::Tiling,
            score: tiling.score(),
            detail: Detail::Tiling {
                unit: settings.unit,
                min_run: settings.min_run,
                matched_weight: tiling.matched_weight,
                total_weight: tiling.total_weight,
                runs,
            },
        }
    }

    fn compare_ngrams(&self, candidate: &SourceFile, reference: &SourceFile) -> Verdict {
        let a = self.tokenize(candidate).symbols();
        let b = self.tokenize(reference).symbols();
        let profile = NgramProfile::build(&a, &b, self.config.ngram.width);
        Verdict {
            method: Method::Ngram,
            score: profile.score(),
            detail: Detail::Ngram(profile),
        }
    }
}

fn line_run(m: &TileMatch) -> SharedRun {
    SharedRun {
        candidate: LineRange {
            first: m.candidate + 1,
            last: m.candidate + m.len,
        },
        reference: LineRange {
            first: m.reference + 1,
            last: m.reference + m.len,
        },
        len: m.len,
    }
}

fn symbol_run(m: &TileMatch, candidate: (&str, &TokenStream), reference: (&str, &TokenStream)) -> Option<SharedRun> {
    Some(SharedRun {
        candidate: token_lines(candidate.0, candidate.1, m.candidate, m.len)?,
        reference: token_lines(reference.0, reference.1, m.reference, m.len)?,
        len: m.len,
    })
}

/// Lines covered by tokens `first..first + len`.
fn token_lines(text: &str, stream: &TokenStream, first: usize, len: usize) -> Option<LineRange> {
    let tokens = stream.tokens().get(first..first + len)?;
    let start = tokens.first()?.start();
    let end = tokens.iter().map(|t| t.end()).max()?;
    Some(LineRange {
        first: line_of(text, start),
        last: line_of(text, end.saturating_sub(1).max(start)),
    })
}

fn line_of(text: &str, offset: usize) -> usize {
    let bytes = text.as_bytes();
    bytes[..offset.min(bytes.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, text: &str) -> SourceFile {
        SourceFile::from_text(name, text)
    }

    #[test]
    fn identical_files_score_full_on_every_method() {
        let text = "def add(a, b):\n    total = a + b\n    return total\n\nprint(add(1, 2))\n";
        let detector = Detector::new(&Config::default()).unwrap();
        let verdicts = detector
            .compare_all(&file("a.py", text), &file("b.py", text))
            .unwrap();
        assert_eq!(verdicts.len(), 3);
        for v in verdicts {
            assert!((v.score - 100.0).abs() < f64::EPSILON, "{:?}", v.method);
        }
    }

    #[test]
    fn line_runs_are_one_based() {
        let m = TileMatch {
            candidate: 0,
            reference: 3,
            len: 2,
        };
        let run = line_run(&m);
        assert_eq!(run.candidate, LineRange { first: 1, last: 2 });
        assert_eq!(run.reference, LineRange { first: 4, last: 5 });
    }

    #[test]
    fn symbol_tiling_reports_lines() {
        let mut config = Config::default();
        config.tiling.unit = TilingUnit::Symbols;
        config.tiling.min_run = 2;
        let detector = Detector::new(&config).unwrap();
        let text = "x = 1\nif x > 0:\n    y = f(x)\n";
        let v = detector
            .compare(&file("a.py", text), &file("b.py", text), Method::Tiling)
            .unwrap();
        match v.detail {
            Detail::Tiling { runs, .. } => {
                let run = runs.first().copied().unwrap();
                assert_eq!(run.candidate.first, 1);
                assert_eq!(run.candidate.last, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn tree_needs_a_grammar() {
        let detector = Detector::new(&Config::default()).unwrap();
        let err = detector
            .compare(&file("a.c", "int x;"), &file("b.c", "int x;"), Method::Tree)
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn line_of_counts_newlines() {
        assert_eq!(line_of("a\nb\nc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 2), 2);
        assert_eq!(line_of("a\nb\nc", 99), 3);
    }
}
