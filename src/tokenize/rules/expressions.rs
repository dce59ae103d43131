// src/tokenize/rules/expressions.rs
//! Operator passes. Everything here claims with the operator fill so that a
//! consumed operator never reads as an operand to the passes after it.

use super::{emit, Emit, Rule};
use crate::error::Result;
use crate::lang::Dialect;
use crate::tokenize::alphabet::SymbolAlphabet;
use crate::tokenize::scan::{operand, Pattern, Scan, OPERATOR};
use regex::Regex;

/// `x op= y` yields an assign marker followed by the operator's own symbol.
pub struct CompoundAssign {
    re: Regex,
    assign: char,
    math: char,
    shift: char,
}

impl CompoundAssign {
    /// # Errors
    /// Returns the regex compile error.
    pub fn new(a: &SymbolAlphabet) -> Result<Self> {
        Ok(Self {
            re: Regex::new(r"(<<|>>|\*\*|//|&|\^|\||\+|-|\*|/|%)=")?,
            assign: a.assign,
            math: a.math,
            shift: a.shift,
        })
    }
}

impl Rule for CompoundAssign {
    fn name(&self) -> &'static str {
        "compound_assignment"
    }

    fn apply(&self, mut scan: Scan) -> Scan {
        let hits: Vec<_> = self
            .re
            .captures_iter(scan.text())
            .filter_map(|c| Some((c.get(0)?.range(), c.get(1)?.as_str().to_string())))
            .collect();
        for (whole, op) in hits {
            if scan.is_claimed(&whole) || scan.text().as_bytes().get(whole.end) == Some(&b'=') {
                continue;
            }
            let symbol = match op.as_str() {
                "<<" | ">>" | "&" | "^" | "|" => self.shift,
                _ => self.math,
            };
            scan.mark(self.assign, whole.start);
            scan.take(symbol, whole.start..whole.start + op.len(), OPERATOR);
            scan.claim(whole, OPERATOR);
        }
        scan
    }
}

fn not_equals(b: Option<u8>) -> bool {
    b != Some(b'=')
}

fn not_arrow_or_step(b: Option<u8>) -> bool {
    !matches!(b, Some(b'>' | b'+' | b'-' | b'='))
}

fn operand_or_opener(b: Option<u8>) -> bool {
    operand(b) || matches!(b, Some(b'(' | b'~' | b'!' | b' ' | b'\t'))
}

fn not_arrow(b: Option<u8>) -> bool {
    !matches!(b, Some(b'-' | b'='))
}

fn assign_lead(b: Option<u8>) -> bool {
    !matches!(b, Some(b'=' | b'!' | b'<' | b'>' | b'`'))
}

fn assign_tail(b: Option<u8>) -> bool {
    !matches!(b, Some(b'=' | b'>'))
}

fn op(name: &'static str, pattern: Pattern, symbol: char) -> Box<dyn Rule> {
    Emit::new(name, pattern, symbol).filling(OPERATOR).boxed()
}

/// Compound assignment, increments, arithmetic, logic, bitwise, comparison.
pub fn operators(dialect: Dialect, a: &SymbolAlphabet) -> Result<Vec<Box<dyn Rule>>> {
    let mut rules: Vec<Box<dyn Rule>> = vec![Box::new(CompoundAssign::new(a)?)];
    if dialect == Dialect::CFamily {
        rules.push(emit(
            "increments",
            r"\w+\s*(?:\+\+|--)|(?:\+\+|--)\s*\w+",
            a.math,
        )?);
    }
    rules.push(op(
        "multiplication",
        Pattern::new(r"\s*(\*\*?)")?.preceded_by(operand),
        a.math,
    ));
    rules.push(op(
        "arithmetic",
        Pattern::new(r"\s*(//|[+\-/%])")?
            .preceded_by(operand)
            .followed_by(not_arrow_or_step),
        a.math,
    ));
    match dialect {
        Dialect::CFamily => {
            rules.push(op("logic", Pattern::new(r"&&|\|\|")?, a.logic));
            rules.push(op(
                "negation",
                Pattern::new(r"!")?.followed_by(not_equals),
                a.logic,
            ));
        }
        Dialect::Python => {
            rules.push(op("logic", Pattern::new(r"\b(?:and|or|not)\b")?, a.logic));
        }
    }
    rules.push(op(
        "bitwise",
        Pattern::new(r"\s*(<<|>>|&|\^|\|)\s*")?
            .preceded_by(operand)
            .followed_by(operand_or_opener),
        a.shift,
    ));
    rules.push(op("complement", Pattern::new(r"~")?, a.shift));
    rules.push(op(
        "comparison",
        Pattern::new(r"===|!==|==|!=|<=|>=|<|>")?.preceded_by(not_arrow),
        a.compare,
    ));
    Ok(rules)
}

/// `= { ... };` aggregate initializers, claimed whole.
pub fn initializers(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    Ok(Emit::new(
        "initializers",
        Pattern::new(r"(=)\s*\{[^;]*\}\s*;")?.preceded_by(assign_lead),
        a.assign,
    )
    .filling(OPERATOR)
    .swallowing()
    .boxed())
}

pub fn assignments(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    Ok(op(
        "assignments",
        Pattern::new(r"=")?
            .preceded_by(assign_lead)
            .followed_by(assign_tail),
        a.assign,
    ))
}

pub fn braces(a: &SymbolAlphabet) -> Result<Vec<Box<dyn Rule>>> {
    Ok(vec![
        emit("open_braces", r"\{", a.open_brace)?,
        emit("close_braces", r"\}", a.close_brace)?,
    ])
}
