// src/tokenize/rules/braces.rs
//! Passes that make block structure explicit.
//!
//! Braceless bodies, `switch` cases and ternaries all get zero-width `{` and
//! `}` markers so they produce the same symbols as their braced equivalents.

use super::Rule;
use crate::error::Result;
use crate::tokenize::alphabet::SymbolAlphabet;
use crate::tokenize::scan::{Pattern, Scan, MASK, SWITCH_END, TERMINATOR};
use regex::Regex;

fn ternary_lead(b: Option<u8>) -> bool {
    b.is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b';' | b'{' | b'}' | b'(' | b')'))
}

/// `cond ? a : b` becomes `I { a } I { b }`, carrying a leading `=` or
/// `return` into both branches. The condition stays on one line and never
/// spans a brace.
pub struct Ternary {
    pattern: Pattern,
    conditional: char,
    open: char,
    close: char,
    assign: char,
    ret: char,
}

impl Ternary {
    /// # Errors
    /// Returns the regex compile error.
    pub fn new(a: &SymbolAlphabet) -> Result<Self> {
        let pattern = Pattern::new(
            r"\s*(=|\breturn\b)?([^;<>={}\n]+(?:==|>=|<=|>|<)[^;<>=?{}\n]+)(\?[^:;]+)(:[^;]+;)",
        )?
        .preceded_by(ternary_lead)
        .consuming();
        Ok(Self {
            pattern,
            conditional: a.conditional,
            open: a.open_brace,
            close: a.close_brace,
            assign: a.assign,
            ret: a.ret,
        })
    }
}

impl Rule for Ternary {
    fn name(&self) -> &'static str {
        "ternary"
    }

    fn apply(&self, mut scan: Scan) -> Scan {
        let hits = self.pattern.hits_where(scan.text(), |hit| {
            let free = |i: Option<std::ops::Range<usize>>| {
                i.is_some_and(|r| !scan.is_claimed(&(r.start..r.start + 1)))
            };
            free(hit.group(3)) && free(hit.group(4))
        });
        for hit in hits {
            let (Some(cond), Some(then), Some(other)) = (hit.group(2), hit.group(3), hit.group(4))
            else {
                continue;
            };
            let lead = hit.group(1);
            let carried = lead.as_ref().map(|r| {
                if &scan.text()[r.clone()] == "=" {
                    self.assign
                } else {
                    self.ret
                }
            });
            let question = then.start;
            let colon = other.start;
            let end = other.end - 1;

            scan.mark(self.conditional, question);
            scan.mark(self.open, question);
            if let Some(symbol) = carried {
                scan.mark(symbol, question);
            }
            scan.mark(self.close, colon);
            scan.mark(self.conditional, colon);
            scan.mark(self.open, colon);
            if let Some(symbol) = carried {
                scan.mark(symbol, colon);
            }
            scan.mark(self.close, end);

            if let Some(lead) = lead {
                scan.claim(lead, MASK);
            }
            scan.claim(cond, MASK);
            scan.claim(question..question + 1, MASK);
            scan.claim(colon..colon + 1, TERMINATOR);
        }
        scan
    }
}

/// Wraps braceless `if`/`else`/`for`/`while`/`do` bodies in markers.
pub struct MissingBraces {
    open: char,
    close: char,
    else_body: Regex,
    do_body: Regex,
    for_header: Regex,
    keyword: Regex,
    header_body: Regex,
    leading_if: Regex,
}

impl MissingBraces {
    /// # Errors
    /// Returns the regex compile error.
    pub fn new(a: &SymbolAlphabet) -> Result<Self> {
        Ok(Self {
            open: a.open_brace,
            close: a.close_brace,
            else_body: Regex::new(r"\belse\s*([^;{}]+;)")?,
            do_body: Regex::new(r"\bdo\b\s*([^;{}]+;)")?,
            for_header: Regex::new(r"\bfor\s*\(([^;{}]*;[^;{}]*;[^){}]*)\)")?,
            keyword: Regex::new(r"\b(?:while|if|for)\b")?,
            header_body: Regex::new(r"^(?:while|if|for)\s*\([^;{}]+?\)\s*([^;{}]+;)")?,
            leading_if: Regex::new(r"^\s*if\b")?,
        })
    }

    fn bodies(&self, text: &str) -> Vec<std::ops::Range<usize>> {
        let mut bodies = Vec::new();
        for caps in self.else_body.captures_iter(text) {
            if let Some(body) = caps.get(1) {
                if !self.leading_if.is_match(body.as_str()) {
                    bodies.push(body.range());
                }
            }
        }
        bodies.extend(
            self.do_body
                .captures_iter(text)
                .filter_map(|c| c.get(1))
                .map(|m| m.range()),
        );

        // for-header semicolons are hidden from the body search
        let mut local = text.to_string();
        let headers: Vec<_> = self
            .for_header
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.range())
            .collect();
        for header in headers {
            local.replace_range(header.clone(), &".".repeat(header.len()));
        }
        for kw in self.keyword.find_iter(&local) {
            if let Some(body) = self
                .header_body
                .captures(&local[kw.start()..])
                .and_then(|c| c.get(1))
            {
                bodies.push(kw.start() + body.start()..kw.start() + body.end());
            }
        }
        bodies
    }
}

impl Rule for MissingBraces {
    fn name(&self) -> &'static str {
        "missing_braces"
    }

    fn apply(&self, mut scan: Scan) -> Scan {
        for body in self.bodies(scan.text()) {
            let start = body.start
                + scan.text()[body.clone()]
                    .bytes()
                    .take_while(u8::is_ascii_whitespace)
                    .count();
            scan.mark(self.open, start);
            scan.mark(self.close, body.end);
        }
        scan
    }
}

/// Turns each `case` into a conditional block and hides the `switch` shell.
pub struct Switch {
    conditional: char,
    open: char,
    close: char,
    header: Regex,
    breaks: Regex,
    case: Regex,
}

impl Switch {
    /// # Errors
    /// Returns the regex compile error.
    pub fn new(a: &SymbolAlphabet) -> Result<Self> {
        Ok(Self {
            conditional: a.conditional,
            open: a.open_brace,
            close: a.close_brace,
            header: Regex::new(r"\bswitch\b[^{;]*\{")?,
            breaks: Regex::new(r"(?s)\b(?:case|default)\b[^:]*:.*?(\bbreak\s*;)")?,
            case: Regex::new(r"\b(?:case\b[^:\n]*|default\s*):")?,
        })
    }
}

impl Rule for Switch {
    fn name(&self) -> &'static str {
        "switch"
    }

    fn apply(&self, mut scan: Scan) -> Scan {
        let headers: Vec<_> = self
            .header
            .find_iter(scan.text())
            .map(|m| m.range())
            .collect();
        for header in headers {
            if scan.is_claimed(&header) {
                continue;
            }
            let Some(end) = closing_brace(scan.text(), header.end) else {
                continue;
            };
            scan.claim(end..end + 1, SWITCH_END);

            let region = header.end..end;
            let breaks: Vec<_> = self
                .breaks
                .captures_iter(&scan.text()[region.clone()])
                .filter_map(|c| c.get(1))
                .map(|m| region.start + m.start()..region.start + m.end())
                .collect();
            for b in breaks {
                scan.claim(b, MASK);
            }
            scan.claim(header, TERMINATOR);

            let labels: Vec<_> = self
                .case
                .find_iter(&scan.text()[region.clone()])
                .map(|m| region.start + m.start()..region.start + m.end())
                .collect();
            for label in labels {
                if !scan.take(self.conditional, label.clone(), TERMINATOR) {
                    continue;
                }
                let bytes = scan.text().as_bytes();
                let body = label.end
                    + bytes[label.end..]
                        .iter()
                        .take_while(|b| b.is_ascii_whitespace())
                        .count();
                if bytes.get(body) == Some(&b'{') {
                    continue;
                }
                let stop = case_end(scan.text(), body).unwrap_or(end);
                scan.mark(self.open, label.end);
                scan.mark(self.close, stop);
            }
        }
        scan
    }
}

/// Index of the `}` that closes the block opened just before `from`.
fn closing_brace(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in text.bytes().enumerate().skip(from) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Where a braceless case body stops: the next label at the same depth or
/// the end of the switch.
fn case_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match b {
            b'{' => depth += 1,
            b'}' if depth > 0 => depth -= 1,
            b'}' => return Some(i),
            c if c == SWITCH_END as u8 && depth == 0 => return Some(i),
            _ if depth == 0 && (starts_word(bytes, i, b"case") || starts_word(bytes, i, b"default")) => {
                return Some(i)
            }
            _ => {}
        }
    }
    None
}

fn starts_word(bytes: &[u8], at: usize, word: &[u8]) -> bool {
    let is_word = |b: &u8| b.is_ascii_alphanumeric() || *b == b'_';
    bytes[at..].starts_with(word)
        && (at == 0 || !bytes.get(at - 1).is_some_and(is_word))
        && !bytes.get(at + word.len()).is_some_and(is_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(scan: &Scan) -> String {
        let mut tokens = scan.tokens().to_vec();
        tokens.sort_by_key(|t| (t.start(), t.end()));
        tokens.iter().map(|t| t.symbol()).collect()
    }

    #[test]
    fn ternary_assignment_is_two_branches() {
        let rule = Ternary::new(&SymbolAlphabet::default()).unwrap();
        let scan = rule.apply(Scan::new("x = a > b ? c : d;"));
        assert_eq!(symbols(&scan), "I{A}I{A}");
        assert!(!scan.text().contains('?'));
    }

    #[test]
    fn ternary_return_after_block_keeps_the_block() {
        let rule = Ternary::new(&SymbolAlphabet::default()).unwrap();
        let scan = rule.apply(Scan::new("if (s) { s = 1; }\n return s > 0 ? s : -s;"));
        assert_eq!(symbols(&scan), "I{R}I{R}");
        assert!(scan.text().starts_with("if (s) { s = 1; }\n"));
        assert!(!scan.text().contains("return"));
    }

    #[test]
    fn braceless_if_and_else_get_markers() {
        let rule = MissingBraces::new(&SymbolAlphabet::default()).unwrap();
        let scan = rule.apply(Scan::new("if (x) y = 1;\nelse y = 2;\n"));
        assert_eq!(symbols(&scan), "{}{}");
    }

    #[test]
    fn else_if_chain_is_left_to_the_if() {
        let rule = MissingBraces::new(&SymbolAlphabet::default()).unwrap();
        let scan = rule.apply(Scan::new("if (a) b; else if (c) d;"));
        assert_eq!(scan.tokens().len(), 4);
    }

    #[test]
    fn for_header_semicolons_do_not_end_the_body() {
        let rule = MissingBraces::new(&SymbolAlphabet::default()).unwrap();
        let src = "for (i = 0; i < n; i++) s += i;";
        let scan = rule.apply(Scan::new(src));
        let close = scan.tokens().iter().find(|t| t.symbol() == '}').unwrap();
        assert_eq!(close.start(), src.len());
    }

    #[test]
    fn braced_bodies_are_untouched() {
        let rule = MissingBraces::new(&SymbolAlphabet::default()).unwrap();
        let scan = rule.apply(Scan::new("while (x) { x--; }\ndo { y++; } while (y < 3);"));
        assert!(scan.tokens().is_empty());
    }

    #[test]
    fn switch_cases_become_blocks() {
        let rule = Switch::new(&SymbolAlphabet::default()).unwrap();
        let src = "switch (k) {\ncase 1: a(); break;\ndefault: b();\n}";
        let scan = rule.apply(Scan::new(src));
        assert_eq!(symbols(&scan), "I{}I{}");
        assert!(!scan.text().contains("break"));
        assert!(scan.text().contains('$'));
    }
}
