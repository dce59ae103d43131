// src/ngram.rs
//! N-gram set similarity over symbol streams.

use serde::Serialize;
use std::collections::HashSet;

/// Every distinct window of `width` characters. Empty for a zero width or a
/// string shorter than the window.
#[must_use]
pub fn ngrams(symbols: &str, width: usize) -> HashSet<&str> {
    if width == 0 {
        return HashSet::new();
    }
    let bounds: Vec<usize> = symbols
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(symbols.len()))
        .collect();
    bounds
        .windows(width + 1)
        .filter_map(|w| Some(&symbols[*w.first()?..*w.last()?]))
        .collect()
}

/// Set sizes behind a score, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NgramProfile {
    pub width: usize,
    pub candidate: usize,
    pub reference: usize,
    pub shared: usize,
    pub union: usize,
}

impl NgramProfile {
    #[must_use]
    pub fn build(candidate: &str, reference: &str, width: usize) -> Self {
        let a = ngrams(candidate, width);
        let b = ngrams(reference, width);
        Self {
            width,
            candidate: a.len(),
            reference: b.len(),
            shared: a.intersection(&b).count(),
            union: a.union(&b).count(),
        }
    }

    /// `shared / union` as a whole percentage, ties rounded to even.
    /// Two empty sets score 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self) -> f64 {
        if self.union == 0 {
            return 0.0;
        }
        (self.shared as f64 / self.union as f64 * 100.0).round_ties_even()
    }
}

#[must_use]
pub fn similarity(candidate: &str, reference: &str, width: usize) -> f64 {
    NgramProfile::build(candidate, reference, width).score()
}
