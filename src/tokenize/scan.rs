// src/tokenize/scan.rs
//! The working copy a rule pass reads and rewrites.
//!
//! Offsets in the working copy are byte offsets into the original source:
//! every rewrite replaces a span with the same number of bytes, and any
//! non-ASCII byte is folded to a single placeholder up front so the copy is
//! pure ASCII and every offset is a char boundary.

use super::Token;
use regex::Regex;
use std::ops::Range;

/// Fill for constructs that were consumed and now read as an operand.
pub const MASK: char = '.';
/// Fill for string and character literals.
pub const LITERAL: char = '1';
/// Fill for comments and imports.
pub const BLANK: char = ' ';
/// Fill that reads as a statement end.
pub const TERMINATOR: char = ';';
/// Marks the closing brace of a `switch` body.
pub const SWITCH_END: char = '$';
/// Fill for operators that already produced a token.
pub const OPERATOR: char = '`';

const FOREIGN: char = '\u{7f}';

/// Predicate on the byte adjacent to a match (`None` at the buffer edge).
pub type Guard = fn(Option<u8>) -> bool;

/// One accepted regex match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub whole: Range<usize>,
    /// First participating capture group, or the whole match.
    pub token: Range<usize>,
    /// Every capture group, index 0 being the whole match.
    pub groups: Vec<Option<Range<usize>>>,
}

impl Hit {
    #[must_use]
    pub fn group(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }
}

/// A regex plus the context checks the regex engine cannot express.
///
/// Scanning resumes at the end of the token rather than the end of the match,
/// so trailing context stays available to the next match.
#[derive(Debug, Clone)]
pub struct Pattern {
    re: Regex,
    preceded_by: Option<Guard>,
    followed_by: Option<Guard>,
    reject: Option<fn(&str) -> bool>,
    consume: bool,
}

impl Pattern {
    /// # Errors
    /// Returns the regex compile error.
    pub fn new(re: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(re)?,
            preceded_by: None,
            followed_by: None,
            reject: None,
            consume: false,
        })
    }

    /// Requires the byte before the match to satisfy `guard`.
    #[must_use]
    pub fn preceded_by(mut self, guard: Guard) -> Self {
        self.preceded_by = Some(guard);
        self
    }

    /// Requires the byte after the match to satisfy `guard`.
    #[must_use]
    pub fn followed_by(mut self, guard: Guard) -> Self {
        self.followed_by = Some(guard);
        self
    }

    /// Drops matches whose token text satisfies `reject`.
    #[must_use]
    pub fn rejecting(mut self, reject: fn(&str) -> bool) -> Self {
        self.reject = Some(reject);
        self
    }

    /// Resumes scanning after the whole match.
    #[must_use]
    pub fn consuming(mut self) -> Self {
        self.consume = true;
        self
    }

    /// All non-overlapping hits over `text`.
    #[must_use]
    pub fn hits(&self, text: &str) -> Vec<Hit> {
        self.hits_where(text, |_| true)
    }

    /// Like [`Pattern::hits`], retrying one byte further whenever `accept`
    /// or a context check refuses a match.
    pub fn hits_where(&self, text: &str, accept: impl Fn(&Hit) -> bool) -> Vec<Hit> {
        let bytes = text.as_bytes();
        let mut hits = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(caps) = self.re.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let retry = whole.start() + 1;
            let before = whole.start().checked_sub(1).and_then(|i| bytes.get(i).copied());
            let after = bytes.get(whole.end()).copied();
            if !self.preceded_by.map_or(true, |g| g(before))
                || !self.followed_by.map_or(true, |g| g(after))
            {
                pos = retry;
                continue;
            }
            let token = caps
                .iter()
                .skip(1)
                .flatten()
                .next()
                .unwrap_or(whole)
                .range();
            if self.reject.is_some_and(|r| r(&text[token.clone()])) {
                pos = retry;
                continue;
            }
            let hit = Hit {
                whole: whole.range(),
                token,
                groups: caps.iter().map(|g| g.map(|m| m.range())).collect(),
            };
            if !accept(&hit) {
                pos = retry;
                continue;
            }
            pos = if self.consume {
                hit.whole.end.max(retry)
            } else {
                hit.token.end.max(retry)
            };
            hits.push(hit);
        }
        hits
    }
}

/// Working text, claimed-byte map and the tokens emitted so far.
#[derive(Debug, Clone)]
pub struct Scan {
    text: String,
    claimed: Vec<bool>,
    tokens: Vec<Token>,
}

impl Scan {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let text: String = source
            .bytes()
            .map(|b| if b.is_ascii() { char::from(b) } else { FOREIGN })
            .collect();
        let claimed = vec![false; text.len()];
        Self {
            text,
            claimed,
            tokens: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    #[must_use]
    pub fn is_claimed(&self, span: &Range<usize>) -> bool {
        self.claimed
            .get(span.clone())
            .is_some_and(|bytes| bytes.iter().any(|c| *c))
    }

    /// Hits whose token does not touch a claimed byte.
    #[must_use]
    pub fn hits(&self, pattern: &Pattern) -> Vec<Hit> {
        pattern.hits_where(&self.text, |hit| !self.is_claimed(&hit.token))
    }

    /// Records a token. Non-empty spans over claimed bytes are refused.
    pub fn emit(&mut self, symbol: char, span: Range<usize>) -> bool {
        if span.end > self.text.len() || span.start > span.end {
            return false;
        }
        if !span.is_empty() && self.is_claimed(&span) {
            return false;
        }
        self.tokens.push(Token::new(symbol, span.start, span.end));
        true
    }

    /// Records a zero-width token.
    pub fn mark(&mut self, symbol: char, at: usize) {
        self.emit(symbol, at..at);
    }

    /// Overwrites `span` with `fill`, keeping newlines. Claims nothing.
    pub fn rewrite(&mut self, span: Range<usize>, fill: char) -> Range<usize> {
        let end = span.end.min(self.text.len());
        let start = span.start.min(end);
        if start < end {
            let replacement: String = self.text[start..end]
                .chars()
                .map(|c| if c == '\n' { '\n' } else { fill })
                .collect();
            self.text.replace_range(start..end, &replacement);
        }
        start..end
    }

    /// Overwrites `span` like [`Scan::rewrite`] and claims it.
    pub fn claim(&mut self, span: Range<usize>, fill: char) {
        let span = self.rewrite(span, fill);
        for c in &mut self.claimed[span] {
            *c = true;
        }
    }

    /// Emits a token over `span` and claims it, or does nothing.
    pub fn take(&mut self, symbol: char, span: Range<usize>, fill: char) -> bool {
        if self.emit(symbol, span.clone()) {
            self.claim(span, fill);
            true
        } else {
            false
        }
    }
}

/// Operand-like neighbour: identifier, literal fill, masked construct, closer.
pub fn operand(b: Option<u8>) -> bool {
    b.is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b')' | b']' | b'.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_bytes_keep_offsets() {
        let scan = Scan::new("a = \"é\";");
        assert_eq!(scan.text().len(), "a = \"é\";".len());
        assert!(scan.text().is_ascii());
    }

    #[test]
    fn claimed_bytes_refuse_tokens() {
        let mut scan = Scan::new("abc def");
        scan.claim(0..3, MASK);
        assert_eq!(scan.text(), "... def");
        assert!(!scan.emit('X', 1..2));
        assert!(scan.emit('X', 4..7));
        scan.mark('{', 2);
        assert_eq!(scan.tokens().len(), 2);
    }

    #[test]
    fn claim_keeps_newlines() {
        let mut scan = Scan::new("/* a\nb */x");
        scan.claim(0..9, BLANK);
        assert_eq!(scan.text(), "    \n    x");
    }

    #[test]
    fn guards_retry_one_byte_later() {
        let p = Pattern::new(r"\s*(\*)").unwrap().preceded_by(operand);
        let spans: Vec<_> = p.hits("a * *b").into_iter().map(|h| h.token).collect();
        assert_eq!(spans, vec![2..3]);
    }

    #[test]
    fn trailing_context_is_not_consumed() {
        let p = Pattern::new(r"(\w+)\s*;").unwrap();
        let hits = p.hits("a; b;");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].token, 0..1);
        assert_eq!(hits[1].token, 3..4);
    }
}
