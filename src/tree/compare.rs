// src/tree/compare.rs
//! Lock-step structural comparison of two syntax trees.
//!
//! Every node pair reached counts as one visit. A kind mismatch counts once
//! and stops descent into that pair. Under `Strict` every scalar pair is a
//! visit too; under `Loose` only a scalar pair of different kinds is, as one
//! visited mismatch.

use super::{Field, Scalar, SyntaxNode};
use serde::{Deserialize, Serialize};

/// How scalar field values are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarPolicy {
    /// Equal when both values have the same primitive kind.
    #[default]
    Loose,
    /// Equal only when the values are equal.
    Strict,
}

/// How sequences of unequal length are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencePolicy {
    /// Each element without a partner is one visited mismatch.
    #[default]
    Penalize,
    /// Only the common prefix is compared.
    Truncate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    pub scalars: ScalarPolicy,
    pub sequences: SequencePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TreeComparison {
    pub identical: bool,
    pub visited: usize,
    pub mismatches: usize,
}

impl TreeComparison {
    /// `(1 - mismatches / visited) * 100`, or 0 when nothing was visited.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn similarity(&self) -> f64 {
        if self.visited == 0 {
            return 0.0;
        }
        (1.0 - self.mismatches as f64 / self.visited as f64) * 100.0
    }
}

struct Walk<'a> {
    options: CompareOptions,
    pending: Vec<(&'a SyntaxNode, &'a SyntaxNode)>,
    visited: usize,
    mismatches: usize,
}

impl<'a> Walk<'a> {
    fn miss(&mut self, n: usize) {
        self.visited += n;
        self.mismatches += n;
    }

    fn node(&mut self, a: &'a SyntaxNode, b: &'a SyntaxNode) {
        self.visited += 1;
        if a.kind() != b.kind() {
            self.mismatches += 1;
            return;
        }
        for (name, fa) in a.fields() {
            match b.field(name) {
                Some(fb) => self.field(fa, fb),
                None => self.miss(1),
            }
        }
        let only_b = b
            .fields()
            .iter()
            .filter(|(name, _)| a.field(name).is_none())
            .count();
        self.miss(only_b);
    }

    fn field(&mut self, a: &'a Field, b: &'a Field) {
        match (a, b) {
            (Field::Scalar(x), Field::Scalar(y)) => self.scalar(x, y),
            (Field::Node(x), Field::Node(y)) => self.pending.push((x, y)),
            (Field::Sequence(xs), Field::Sequence(ys)) => self.sequence(xs, ys),
            (Field::Node(x), Field::Sequence(ys)) => self.sequence(std::slice::from_ref(x), ys),
            (Field::Sequence(xs), Field::Node(y)) => self.sequence(xs, std::slice::from_ref(y)),
            _ => self.miss(1),
        }
    }

    fn sequence(&mut self, xs: &'a [SyntaxNode], ys: &'a [SyntaxNode]) {
        self.pending.extend(xs.iter().zip(ys));
        if self.options.sequences == SequencePolicy::Penalize {
            self.miss(xs.len().abs_diff(ys.len()));
        }
    }

    fn scalar(&mut self, x: &Scalar, y: &Scalar) {
        match self.options.scalars {
            ScalarPolicy::Loose => {
                if x.kind() != y.kind() {
                    self.miss(1);
                }
            }
            ScalarPolicy::Strict => {
                self.visited += 1;
                if !x.same_value(y) {
                    self.mismatches += 1;
                }
            }
        }
    }
}

/// Compares two trees in synchronized pre-order.
#[must_use]
pub fn compare(a: &SyntaxNode, b: &SyntaxNode, options: CompareOptions) -> TreeComparison {
    let mut walk = Walk {
        options,
        pending: vec![(a, b)],
        visited: 0,
        mismatches: 0,
    };
    while let Some((x, y)) = walk.pending.pop() {
        walk.node(x, y);
    }
    TreeComparison {
        identical: walk.visited > 0 && walk.mismatches == 0,
        visited: walk.visited,
        mismatches: walk.mismatches,
    }
}
