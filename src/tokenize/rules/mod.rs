// src/tokenize/rules/mod.rs
//! Rule passes and the order they run in.

pub mod braces;
pub mod expressions;
pub mod masking;
pub mod structure;

use super::alphabet::TokenizerConfig;
use super::scan::{Pattern, Scan, MASK};
use crate::error::Result;
use crate::lang::Dialect;

/// One pass over the working copy.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, scan: Scan) -> Scan;
}

/// Rewrites every match with a filler and emits nothing.
///
/// Stripped bytes stay unclaimed: a literal inside a loop header must not
/// stop the header from becoming a token.
pub struct Strip {
    name: &'static str,
    pattern: Pattern,
    fill: char,
}

impl Strip {
    /// # Errors
    /// Returns the regex compile error.
    pub fn new(name: &'static str, re: &str, fill: char) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Pattern::new(re)?,
            fill,
        })
    }
}

impl Rule for Strip {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, mut scan: Scan) -> Scan {
        for hit in self.pattern.hits(scan.text()) {
            scan.rewrite(hit.whole, self.fill);
        }
        scan
    }
}

/// Emits one symbol per hit and claims the token span.
pub struct Emit {
    name: &'static str,
    pattern: Pattern,
    symbol: char,
    fill: char,
    swallow: bool,
}

impl Emit {
    #[must_use]
    pub fn new(name: &'static str, pattern: Pattern, symbol: char) -> Self {
        Self {
            name,
            pattern,
            symbol,
            fill: MASK,
            swallow: false,
        }
    }

    #[must_use]
    pub fn filling(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    /// Claims the whole match, not only the token.
    #[must_use]
    pub fn swallowing(mut self) -> Self {
        self.swallow = true;
        self
    }

    #[must_use]
    pub fn boxed(self) -> Box<dyn Rule> {
        Box::new(self)
    }
}

impl Rule for Emit {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, mut scan: Scan) -> Scan {
        for hit in scan.hits(&self.pattern) {
            if scan.take(self.symbol, hit.token.clone(), self.fill) && self.swallow {
                scan.claim(hit.whole, self.fill);
            }
        }
        scan
    }
}

/// Shorthand for an [`Emit`] over a plain regex.
pub(crate) fn emit(name: &'static str, re: &str, symbol: char) -> Result<Box<dyn Rule>> {
    Ok(Emit::new(name, Pattern::new(re)?, symbol).boxed())
}

/// Compiles the ordered pass list for the configured dialect.
///
/// # Errors
/// Returns `Regex` if a generated pattern does not compile.
pub fn pipeline(config: &TokenizerConfig) -> Result<Vec<Box<dyn Rule>>> {
    match config.dialect {
        Dialect::CFamily => c_family(config),
        Dialect::Python => python(config),
    }
}

fn c_family(config: &TokenizerConfig) -> Result<Vec<Box<dyn Rule>>> {
    let a = &config.alphabet;
    let mut rules: Vec<Box<dyn Rule>> = vec![
        masking::c_literals()?,
        masking::c_comments()?,
        masking::c_imports()?,
        masking::c_preprocessor()?,
        Box::new(braces::Ternary::new(a)?),
        structure::function_pointers(a)?,
        structure::pointer_returning_functions(a)?,
        Box::new(braces::MissingBraces::new(a)?),
    ];
    rules.extend(structure::c_loops(a)?);
    rules.push(Box::new(braces::Switch::new(a)?));
    rules.push(structure::c_conditionals(a)?);
    rules.push(structure::c_functions(a)?);
    rules.extend(structure::c_structs(a)?);
    rules.push(structure::c_calls(a)?);
    rules.push(structure::casts(a)?);
    rules.push(structure::returns(Dialect::CFamily, a)?);
    rules.extend(structure::declarations(config)?);
    rules.push(structure::control(Dialect::CFamily, a)?);
    rules.extend(expressions::operators(Dialect::CFamily, a)?);
    rules.push(expressions::initializers(a)?);
    rules.push(expressions::assignments(a)?);
    rules.extend(expressions::braces(a)?);
    Ok(rules)
}

fn python(config: &TokenizerConfig) -> Result<Vec<Box<dyn Rule>>> {
    let a = &config.alphabet;
    let mut rules: Vec<Box<dyn Rule>> = vec![
        masking::py_literals()?,
        masking::py_comments()?,
        masking::py_imports()?,
        Box::new(masking::Docstrings),
        structure::py_loops(a)?,
        structure::py_conditionals(a)?,
    ];
    rules.extend(structure::py_functions(a)?);
    rules.extend(structure::py_classes(a)?);
    rules.push(structure::py_calls(a)?);
    rules.push(structure::returns(Dialect::Python, a)?);
    rules.push(structure::control(Dialect::Python, a)?);
    rules.extend(expressions::operators(Dialect::Python, a)?);
    rules.push(expressions::assignments(a)?);
    rules.extend(expressions::braces(a)?);
    Ok(rules)
}
