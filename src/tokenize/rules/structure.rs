// src/tokenize/rules/structure.rs
//! Statement-level constructs: loops, conditionals, definitions, calls,
//! casts, returns, typed declarations and jumps.

use super::{emit, Emit, Rule, Strip};
use crate::error::Result;
use crate::lang::Dialect;
use crate::tokenize::alphabet::{SymbolAlphabet, TokenizerConfig};
use crate::tokenize::scan::{Pattern, MASK};

pub fn function_pointers(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    emit(
        "function_pointers",
        r"(\b\w+(?:\s*\*\s*)*\s*\((?:\s*\*\s*)+\w+(?:\s*\[[^\]]*\])*\s*\)\s*\([^()]*\)\s*)[;=]",
        a.pointer,
    )
}

/// `int (*pick(int k))(int, int) { ... }`
pub fn pointer_returning_functions(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    emit(
        "pointer_returning_functions",
        r"(\b\w+(?:\s*\*\s*)*\s*\((?:\s*\*\s*)+\w+\s*\([^()]*\)\s*\)\s*\([^()]*\)\s*)\{",
        a.function,
    )
}

/// `for`/`while` headers, `do`, and the `while (...);` tail of a do-loop.
pub fn c_loops(a: &SymbolAlphabet) -> Result<Vec<Box<dyn Rule>>> {
    Ok(vec![
        emit(
            "loops",
            r"(\bfor\s*\((?:[^;{}]*;[^;{}]*;)?[^;{}]*?\)\s*)[{\w*(.]|(\bwhile\s*\([^;{}]+?\)\s*)[{\w*(.]",
            a.repeat,
        )?,
        emit("do_loops", r"\bdo\b", a.repeat)?,
        Box::new(Strip::new(
            "do_while_tails",
            r"\bwhile\s*\([^;{}]+\)\s*;",
            MASK,
        )?),
    ])
}

pub fn py_loops(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    emit("loops", r"\b(?:async\s+)?(?:for|while)\b[^:\n]*:", a.repeat)
}

pub fn c_conditionals(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    emit(
        "conditionals",
        r"(\b(?:else\s+)?if\s*\([^;{}]+?\)\s*)[{\w*(.]|(\belse\b)",
        a.conditional,
    )
}

pub fn py_conditionals(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    emit(
        "conditionals",
        r"\b(?:if|elif)\b[^:\n]*:|\belse\s*:",
        a.conditional,
    )
}

/// Function definitions, including a trailing `-> T` or `: T` return type.
pub fn c_functions(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    emit(
        "functions",
        r"(\b\w+(?:(?:\s*\*\s*)+|\s+)\w+\s*\([^{;]*\)(?:\s*(?:->|:)[^{;=]*)?\s*)\{",
        a.function,
    )
}

pub fn py_functions(a: &SymbolAlphabet) -> Result<Vec<Box<dyn Rule>>> {
    Ok(vec![
        emit(
            "functions",
            r"\b(?:async\s+)?def\s+\w+\s*\([^)]*\)[^:\n]*:",
            a.function,
        )?,
        emit("lambdas", r"\blambda\b[^:\n]*:", a.function)?,
    ])
}

pub fn c_structs(a: &SymbolAlphabet) -> Result<Vec<Box<dyn Rule>>> {
    Ok(vec![
        emit(
            "struct_pointers",
            r"\b(?:struct|union)\s+\w+(?:\s*\*\s*)+\w+",
            a.pointer,
        )?,
        emit(
            "struct_definitions",
            r"(\b(?:struct|union|enum|class|interface)\b[^{;()=]*)\{",
            a.structure,
        )?,
        emit(
            "struct_variables",
            r"(\b(?:struct|union)\s+\w+\s+\w+(?:\s*\[[^\]]*\])*(?:\s*,\s*\w+(?:\s*\[[^\]]*\])*)*\s*)[;=]",
            a.structure,
        )?,
    ])
}

pub fn py_classes(a: &SymbolAlphabet) -> Result<Vec<Box<dyn Rule>>> {
    Ok(vec![
        emit("classes", r"\bclass\s+\w+[^:\n]*:", a.structure)?,
        emit("decorators", r"(?m)^[ \t]*(@[\w.]+)", a.structure)?,
    ])
}

const C_NOT_CALLS: &[&str] = &[
    "return", "sizeof", "if", "while", "for", "switch", "case", "else", "do", "new", "delete",
    "typeof",
];

const PY_NOT_CALLS: &[&str] = &[
    "and", "or", "not", "in", "is", "return", "yield", "if", "elif", "while", "for", "with",
    "assert", "del", "await", "lambda", "raise", "except",
];

fn leading_word(token: &str) -> &str {
    let end = token
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(token.len());
    &token[..end]
}

/// A statement that is a call, from the callee to the closing parenthesis.
pub fn c_calls(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    let pattern = Pattern::new(r"(?:^|[^-+*/%|$<>^\s])\s*\b(\w+\s*\([^;{}]*?\)\s*);")?
        .rejecting(|token| C_NOT_CALLS.contains(&leading_word(token)));
    Ok(Emit::new("calls", pattern, a.call).boxed())
}

/// Python calls are claimed by their callee only; the argument list stays
/// visible to the operator passes.
pub fn py_calls(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    let pattern = Pattern::new(r"\b([A-Za-z_]\w*(?:\s*\.\s*[A-Za-z_]\w*)*)\s*\(")?
        .rejecting(|token| PY_NOT_CALLS.contains(&leading_word(token)));
    Ok(Emit::new("calls", pattern, a.call).boxed())
}

pub fn casts(a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    emit(
        "casts",
        r"(\(\s*\w+(?:\s+\w+)*(?:\s*\*)*\s*\)\s*)[\w(.]",
        a.cast,
    )
}

pub fn returns(dialect: Dialect, a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    let re = match dialect {
        Dialect::CFamily => r"\breturn\b",
        Dialect::Python => r"\b(?:return|yield)\b",
    };
    emit("returns", re, a.ret)
}

pub fn control(dialect: Dialect, a: &SymbolAlphabet) -> Result<Box<dyn Rule>> {
    let re = match dialect {
        Dialect::CFamily => r"\b(?:continue|break)\s*;|\bgoto\s+\w+\s*;",
        Dialect::Python => r"\b(?:break|continue|pass)\b",
    };
    emit("control", re, a.control)
}

/// Builds an alternation from type keywords, longest first so that
/// `unsigned long` is not read as `unsigned`.
fn keyword_alternation(keywords: &[&String]) -> String {
    let mut words: Vec<String> = keywords
        .iter()
        .map(|k| {
            k.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    words.dedup();
    words.join("|")
}

const DECLARATORS: &str = r"\w+(?:\s*\[[^\]]*\])*(?:\s*:\s*\d+)?(?:\s*,\s*\w+(?:\s*\[[^\]]*\])*)*\s*";

/// Typed declarations, pointer first, then char, float and int.
pub fn declarations(config: &TokenizerConfig) -> Result<Vec<Box<dyn Rule>>> {
    let a = &config.alphabet;
    let mut rules = Vec::new();
    let all: Vec<&String> = config
        .int_types
        .iter()
        .chain(&config.char_types)
        .chain(&config.float_types)
        .collect();
    if !all.is_empty() {
        let types = keyword_alternation(&all);
        rules.push(emit(
            "pointer_declarations",
            &format!(
                r"\b((?:{types}|void)(?:\s*\*\s*)+(?:const\s+)?\w+(?:\s*\[[^\]]*\])*(?:\s*,(?:\s*\*\s*)*\w+(?:\s*\[[^\]]*\])*)*\s*)[;=]"
            ),
            a.pointer,
        )?);
    }
    let groups = [
        ("char_declarations", &config.char_types, a.char),
        ("float_declarations", &config.float_types, a.double),
        ("int_declarations", &config.int_types, a.int),
    ];
    for (name, list, symbol) in groups {
        if list.is_empty() {
            continue;
        }
        let types = keyword_alternation(&list.iter().collect::<Vec<_>>());
        rules.push(emit(
            name,
            &format!(r"\b((?:{types})\s+{DECLARATORS})[;=]"),
            symbol,
        )?);
    }
    Ok(rules)
}
