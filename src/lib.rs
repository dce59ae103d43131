// src/lib.rs
//! Source-code derivation detection.
//!
//! Three independent strategies score how much a candidate file was derived
//! from a reference: structural comparison of syntax trees ([`tree`]), greedy
//! string tiling ([`tiling`]) and n-gram similarity over the symbol stream
//! produced by the lexical [`tokenize`]r ([`ngram`]). [`engine::Detector`]
//! picks between them.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod exit;
pub mod lang;
pub mod logging;
pub mod matrix;
pub mod ngram;
pub mod report;
pub mod source;
pub mod tiling;
pub mod tokenize;
pub mod tree;
