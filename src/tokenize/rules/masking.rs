// src/tokenize/rules/masking.rs
//! Passes that only erase: literals, comments, imports, preprocessor lines.

use super::{Rule, Strip};
use crate::error::Result;
use crate::tokenize::scan::{Scan, BLANK, LITERAL};

/// String, char and template literals. Char literals are kept short so Rust
/// lifetimes are not mistaken for them.
pub fn c_literals() -> Result<Box<dyn Rule>> {
    Ok(Box::new(Strip::new(
        "literals",
        r#""(?:[^"\\\n]|\\.)*"|'(?:\\.[^'\\\n]{0,8}|[^'\\\n])'|`(?:[^`\\]|\\.)*`"#,
        LITERAL,
    )?))
}

pub fn py_literals() -> Result<Box<dyn Rule>> {
    Ok(Box::new(Strip::new(
        "literals",
        r#"(?s:""".*?"""|'''.*?''')|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#,
        LITERAL,
    )?))
}

/// Both comment forms in one alternation so the leftmost opener wins.
pub fn c_comments() -> Result<Box<dyn Rule>> {
    Ok(Box::new(Strip::new(
        "comments",
        r"//[^\n]*|(?s:/\*.*?\*/)",
        BLANK,
    )?))
}

pub fn py_comments() -> Result<Box<dyn Rule>> {
    Ok(Box::new(Strip::new("comments", r"#[^\n]*", BLANK)?))
}

pub fn c_imports() -> Result<Box<dyn Rule>> {
    Ok(Box::new(Strip::new(
        "imports",
        r"(?m)^[ \t]*#[ \t]*(?:include|import)\b[^\n]*|(?m)^[ \t]*(?:import|use|package)\b[^;\n]*;?",
        BLANK,
    )?))
}

pub fn py_imports() -> Result<Box<dyn Rule>> {
    Ok(Box::new(Strip::new(
        "imports",
        r"(?m)^[ \t]*(?:from[ \t]+[\w.]+[ \t]+)?import\b(?:[^\n(]*\([^)]*\)|[^\n]*)",
        BLANK,
    )?))
}

/// `#define` with its continuation lines, then any other directive.
pub fn c_preprocessor() -> Result<Box<dyn Rule>> {
    Ok(Box::new(Strip::new(
        "preprocessor",
        r"(?m)^[ \t]*#[ \t]*define\b[^\n]*(?:\\\n[^\n]*)*|(?m)^[ \t]*#[ \t]*[a-z]+\b[^\n]*",
        BLANK,
    )?))
}

/// Blanks lines that hold nothing but a string literal.
pub struct Docstrings;

impl Rule for Docstrings {
    fn name(&self) -> &'static str {
        "docstrings"
    }

    fn apply(&self, mut scan: Scan) -> Scan {
        let mut spans = Vec::new();
        let mut offset = 0;
        for line in scan.text().split('\n') {
            let body = line.trim();
            if !body.is_empty() && body.chars().all(|c| c == LITERAL) {
                let start = offset + (line.len() - line.trim_start().len());
                spans.push(start..start + body.len());
            }
            offset += line.len() + 1;
        }
        for span in spans {
            scan.rewrite(span, BLANK);
        }
        scan
    }
}
