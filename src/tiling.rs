// src/tiling.rs
//! Greedy string tiling.
//!
//! Each round scans every unmarked start pair, keeps the longest runs found
//! (ties included) and commits those still fully unmarked. Rounds repeat
//! while the best run is longer than the minimum. Marks only ever grow, so no
//! element takes part in two tiles.

use serde::Serialize;

/// An element that can be tiled.
pub trait Tile: PartialEq {
    /// Content length credited when the element is matched.
    fn weight(&self) -> usize;
}

/// A source line compared without surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a>(&'a str);

impl<'a> Line<'a> {
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        Self(raw.trim())
    }

    #[must_use]
    pub fn text(&self) -> &'a str {
        self.0
    }
}

impl Tile for Line<'_> {
    fn weight(&self) -> usize {
        self.0.chars().count()
    }
}

impl Tile for char {
    fn weight(&self) -> usize {
        1
    }
}

/// A committed run: `len` elements starting at `candidate` and `reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileMatch {
    pub candidate: usize,
    pub reference: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tiling {
    /// In commit order.
    pub matches: Vec<TileMatch>,
    pub matched_weight: usize,
    pub total_weight: usize,
}

impl Tiling {
    /// Matched content over candidate content, as a percentage. An empty
    /// candidate scores 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self) -> f64 {
        if self.total_weight == 0 {
            return 0.0;
        }
        self.matched_weight as f64 / self.total_weight as f64 * 100.0
    }
}

/// Tiles `candidate` against `reference`. A `min_run` of 0 behaves as 1.
pub fn tile<T: Tile>(candidate: &[T], reference: &[T], min_run: usize) -> Tiling {
    let min_run = min_run.max(1);
    let mut marked_c = vec![false; candidate.len()];
    let mut marked_r = vec![false; reference.len()];
    let mut tiling = Tiling {
        total_weight: candidate.iter().map(Tile::weight).sum(),
        ..Tiling::default()
    };

    let mut round = 0usize;
    loop {
        round += 1;
        let mut best = min_run;
        let mut found: Vec<TileMatch> = Vec::new();

        for i in (0..candidate.len()).filter(|&i| !marked_c[i]) {
            for j in (0..reference.len()).filter(|&j| !marked_r[j]) {
                let mut k = 0;
                while i + k < candidate.len()
                    && j + k < reference.len()
                    && !marked_c[i + k]
                    && !marked_r[j + k]
                    && candidate[i + k] == reference[j + k]
                {
                    k += 1;
                }
                if k > best {
                    best = k;
                    found.clear();
                }
                if k == best {
                    found.push(TileMatch {
                        candidate: i,
                        reference: j,
                        len: k,
                    });
                }
            }
        }

        let mut committed = 0;
        for m in found {
            let c_span = m.candidate..m.candidate + m.len;
            let r_span = m.reference..m.reference + m.len;
            if marked_c[c_span.clone()].iter().any(|&x| x)
                || marked_r[r_span.clone()].iter().any(|&x| x)
            {
                continue;
            }
            marked_c[c_span.clone()].fill(true);
            marked_r[r_span].fill(true);
            tiling.matched_weight += candidate[c_span].iter().map(Tile::weight).sum::<usize>();
            tiling.matches.push(m);
            committed += 1;
        }

        tracing::debug!(round, best, committed, "tiling round");
        if best <= min_run {
            break;
        }
    }
    tiling
}

/// Line-level tiling of two buffers.
#[must_use]
pub fn tile_lines(candidate: &str, reference: &str, min_run: usize) -> Tiling {
    let c: Vec<Line> = candidate.lines().map(Line::new).collect();
    let r: Vec<Line> = reference.lines().map(Line::new).collect();
    tile(&c, &r, min_run)
}

/// Tiling over two symbol streams, one element per symbol.
#[must_use]
pub fn tile_symbols(candidate: &str, reference: &str, min_run: usize) -> Tiling {
    let c: Vec<char> = candidate.chars().collect();
    let r: Vec<char> = reference.chars().collect();
    tile(&c, &r, min_run)
}
