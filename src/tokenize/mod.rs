// src/tokenize/mod.rs
//! Lexical reduction of source text to a stream of category symbols.
//!
//! A [`Tokenizer`] is an ordered pipeline of rule passes over a shared
//! [`scan::Scan`]. Each pass finds its construct in the working copy, emits a
//! token per match and erases the match with a neutral placeholder so later,
//! more general passes cannot claim the same bytes. Order is the contract:
//! specific constructs run before the general ones they would be confused
//! with.

pub mod alphabet;
pub mod rules;
pub mod scan;

pub use alphabet::{Category, SymbolAlphabet, TokenizerConfig};

use crate::error::Result;
use crate::lang::Dialect;
use regex::Regex;
use rules::Rule;
use scan::Scan;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// One classified span of the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    symbol: char,
    start: usize,
    end: usize,
}

impl Token {
    #[must_use]
    pub fn new(symbol: char, start: usize, end: usize) -> Self {
        Self { symbol, start, end }
    }

    #[must_use]
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Byte offset into the original source.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn is_marker(&self) -> bool {
        self.start == self.end
    }
}

/// Tokens ordered by position; this order is the symbol string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Orders tokens by start, then end. Equal positions keep emission order,
    /// which is what places `}` before `I` on a ternary's colon.
    #[must_use]
    pub fn from_unsorted(mut tokens: Vec<Token>) -> Self {
        tokens.sort_by_key(|t| (t.start, t.end));
        Self { tokens }
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn symbols(&self) -> String {
        self.tokens.iter().map(Token::symbol).collect()
    }

    /// Finds the first run of tokens spelling `symbols` and returns the source
    /// span from its first token's start to its last token's end.
    #[must_use]
    pub fn locate(&self, symbols: &str) -> Option<(usize, usize)> {
        let wanted: Vec<char> = symbols.chars().collect();
        if wanted.is_empty() || wanted.len() > self.tokens.len() {
            return None;
        }
        self.tokens
            .windows(wanted.len())
            .find(|w| w.iter().map(Token::symbol).eq(wanted.iter().copied()))
            .and_then(|w| Some((w.first()?.start, w.last()?.end)))
    }
}

/// What one rule pass contributed, for `tokens --explain`.
#[derive(Debug, Clone, Serialize)]
pub struct RuleTrace {
    pub rule: &'static str,
    pub emitted: Vec<Token>,
}

/// An immutable, reusable tokenizer. Safe to share across threads.
pub struct Tokenizer {
    config: TokenizerConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("dialect", &self.config.dialect)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl Tokenizer {
    /// Validates the configuration and compiles every rule.
    ///
    /// # Errors
    /// `Alphabet` for an ambiguous alphabet, `Regex` if a type keyword list
    /// produces an invalid pattern.
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        config.validate()?;
        let rules = rules::pipeline(config)?;
        tracing::debug!(dialect = ?config.dialect, rules = rules.len(), "tokenizer compiled");
        Ok(Self {
            config: config.clone(),
            rules,
        })
    }

    /// # Errors
    /// See [`Tokenizer::new`].
    pub fn for_dialect(dialect: Dialect) -> Result<Self> {
        Self::new(&TokenizerConfig::for_dialect(dialect))
    }

    #[must_use]
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    #[must_use]
    pub fn tokenize(&self, source: &str) -> TokenStream {
        let scan = self
            .rules
            .iter()
            .fold(Scan::new(source), |scan, rule| {
                let before = scan.tokens().len();
                let scan = rule.apply(scan);
                tracing::trace!(rule = rule.name(), emitted = scan.tokens().len() - before);
                scan
            });
        TokenStream::from_unsorted(scan.into_tokens())
    }

    /// Tokenizes while recording which pass emitted which tokens.
    #[must_use]
    pub fn explain(&self, source: &str) -> (TokenStream, Vec<RuleTrace>) {
        let mut scan = Scan::new(source);
        let mut trace = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let before = scan.tokens().len();
            scan = rule.apply(scan);
            let emitted = scan.tokens()[before..].to_vec();
            tracing::trace!(rule = rule.name(), emitted = emitted.len());
            trace.push(RuleTrace {
                rule: rule.name(),
                emitted,
            });
        }
        (TokenStream::from_unsorted(scan.into_tokens()), trace)
    }
}

static C_FUNCTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w+(?:(?:\s*\*\s*)+|\s+)(\w+)\s*\([^{;]*\)\s*\{")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static C_POINTER_FUNCTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w+(?:\s*\*\s*)*\s*\((?:\s*\*\s*)+(\w+)\s*\([^{;]*\)\s*\)\s*\([^{;]*\)\s*\{")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static PY_FUNCTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdef\s+(\w+)").unwrap_or_else(|_| panic!("Invalid Regex")));

const NOT_FUNCTIONS: &[&str] = &["main", "if", "while", "for", "switch", "return", "sizeof"];

/// Names of functions defined in `source`, sorted, without `main`.
#[must_use]
pub fn function_names(source: &str, dialect: Dialect) -> Vec<String> {
    let patterns: Vec<&Regex> = match dialect {
        Dialect::CFamily => vec![&*C_FUNCTION_NAME, &*C_POINTER_FUNCTION_NAME],
        Dialect::Python => vec![&*PY_FUNCTION_NAME],
    };
    let names: BTreeSet<String> = patterns
        .into_iter()
        .flat_map(|re| re.captures_iter(source))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !NOT_FUNCTIONS.contains(name))
        .map(str::to_string)
        .collect();
    names.into_iter().collect()
}
