// tests/unit_tree.rs
//! Structural comparison of parsed sources.

use sourcesleuth_core::source::SourceFile;
use sourcesleuth_core::tree::{
    compare, parse_source, CompareOptions, Field, ScalarPolicy, SequencePolicy, SyntaxNode,
};

fn parse(name: &str, text: &str) -> SyntaxNode {
    parse_source(&SourceFile::from_text(name, text)).unwrap()
}

fn strict() -> CompareOptions {
    CompareOptions {
        scalars: ScalarPolicy::Strict,
        ..CompareOptions::default()
    }
}

#[test]
fn test_renamed_identifier_loose_vs_strict() {
    let a = parse("a.py", "x = 1\n");
    let b = parse("b.py", "y = 1\n");

    let loose = compare(&a, &b, CompareOptions::default());
    assert!(loose.identical);
    assert!((loose.similarity() - 100.0).abs() < f64::EPSILON);

    let strict = compare(&a, &b, strict());
    assert!(!strict.identical);
    assert_eq!(strict.mismatches, 1);
    assert!(strict.similarity() > 0.0 && strict.similarity() < 100.0);
}

#[test]
fn test_changed_literal_is_strict_only() {
    let a = parse("a.py", "x = 1\n");
    let b = parse("b.py", "x = 2\n");
    assert!(compare(&a, &b, CompareOptions::default()).identical);
    assert_eq!(compare(&a, &b, strict()).mismatches, 1);
}

#[test]
fn test_different_statement_kinds_mismatch() {
    let a = parse("a.py", "x = 1\n");
    let b = parse("b.py", "pass\n");
    let r = compare(&a, &b, CompareOptions::default());
    assert!(!r.identical);
    assert!(r.mismatches >= 1);
}

#[test]
fn test_extra_statement_penalized_or_truncated() {
    let a = parse("a.py", "x = 1\n");
    let b = parse("b.py", "x = 1\ny = 2\n");

    let penalized = compare(&a, &b, CompareOptions::default());
    assert_eq!(penalized.mismatches, 1);
    assert!(!penalized.identical);

    let truncated = compare(
        &a,
        &b,
        CompareOptions {
            sequences: SequencePolicy::Truncate,
            ..CompareOptions::default()
        },
    );
    assert!(truncated.identical);
}

#[test]
fn test_operators_are_compared() {
    let a = parse("a.py", "z = a + b\n");
    let b = parse("b.py", "z = a - b\n");
    let r = compare(&a, &b, CompareOptions::default());
    assert_eq!(r.mismatches, 1);
}

#[test]
fn test_rust_and_typescript_parse() {
    let rs = parse("a.rs", "fn main() { let x = 1; }");
    assert_eq!(rs.kind(), "source_file");
    let ts = parse("a.ts", "const x: number = 1;");
    assert_eq!(ts.kind(), "program");
    assert!(matches!(ts.field("children"), Some(Field::Sequence(s)) if s.len() == 1));
}

#[test]
fn test_broken_source_still_compares() {
    let a = parse("a.py", "def f(:\n    pass\n");
    let r = compare(&a, &a, CompareOptions::default());
    assert!(r.identical);
}
