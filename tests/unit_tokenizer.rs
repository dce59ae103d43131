// tests/unit_tokenizer.rs
//! Full-pipeline tokenizer behaviour on small, hand-checked inputs.

use pretty_assertions::assert_eq;
use sourcesleuth_core::error::SleuthError;
use sourcesleuth_core::lang::Dialect;
use sourcesleuth_core::tokenize::{SymbolAlphabet, Tokenizer, TokenizerConfig};

fn c() -> Tokenizer {
    Tokenizer::for_dialect(Dialect::CFamily).unwrap()
}

fn py() -> Tokenizer {
    Tokenizer::for_dialect(Dialect::Python).unwrap()
}

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn test_c_function_symbols() {
    let src = "int add(int a, int b) {\n    int s = a + b;\n    return s;\n}\n";
    assert_eq!(c().tokenize(src).symbols(), "F{NAMR}");
}

#[test]
fn test_python_statement_symbols() {
    let src = "x = 1\nif x > 0:\n    y = f(x)\n";
    assert_eq!(py().tokenize(src).symbols(), "AIAC");
}

#[test]
fn test_strings_and_comments_are_inert() {
    let src = "x = 1  # set x = 2\ns = 'a = b'\n";
    assert_eq!(py().tokenize(src).symbols(), "AA");
}

#[test]
fn test_braceless_body_matches_braced() {
    let t = c();
    assert_eq!(t.tokenize("if (x) y = 1;").symbols(), "I{A}");
    assert_eq!(t.tokenize("if (x) { y = 1; }").symbols(), "I{A}");
}

#[test]
fn test_renaming_does_not_change_symbols() {
    let t = c();
    assert_eq!(
        t.tokenize(&fixture("add.c")).symbols(),
        t.tokenize(&fixture("add_renamed.c")).symbols()
    );
    let p = py();
    assert_eq!(
        p.tokenize(&fixture("stats.py")).symbols(),
        p.tokenize(&fixture("stats_renamed.py")).symbols()
    );
}

#[test]
fn test_locate_maps_symbols_back_to_source() {
    let src = "x = 1\nif x > 0:\n    y = f(x)\n";
    let stream = py().tokenize(src);
    let (start, end) = stream.locate("IA").unwrap();
    assert_eq!(&src[start..end], "if x > 0:\n    y =");
}

#[test]
fn test_custom_alphabet() {
    let alphabet = SymbolAlphabet {
        assign: 'Q',
        ..SymbolAlphabet::default()
    };
    let t = Tokenizer::new(&TokenizerConfig::python().with_alphabet(alphabet)).unwrap();
    assert_eq!(t.tokenize("x = 1\nif x > 0:\n    y = f(x)\n").symbols(), "QIQC");
}

#[test]
fn test_ambiguous_alphabet_is_rejected() {
    let alphabet = SymbolAlphabet {
        call: 'A',
        ..SymbolAlphabet::default()
    };
    let err = Tokenizer::new(&TokenizerConfig::c_family().with_alphabet(alphabet)).unwrap_err();
    assert!(matches!(err, SleuthError::Alphabet(_)));
}

#[test]
fn test_explain_attributes_tokens_to_rules() {
    let (stream, trace) = py().explain("x = 1\nif x > 0:\n    y = f(x)\n");
    let emitted: usize = trace.iter().map(|t| t.emitted.len()).sum();
    assert_eq!(emitted, stream.len());
    let assignments = trace.iter().find(|t| t.rule == "assignments").unwrap();
    assert_eq!(assignments.emitted.len(), 2);
}

#[test]
fn test_configs_coexist() {
    let narrow = TokenizerConfig {
        int_types: vec!["int".into()],
        ..TokenizerConfig::c_family()
    };
    let narrow = Tokenizer::new(&narrow).unwrap();
    let full = c();
    assert_eq!(full.tokenize("long n = 3;").symbols(), "NA");
    assert_eq!(narrow.tokenize("long n = 3;").symbols(), "A");
}

#[test]
fn test_empty_and_non_ascii_input() {
    assert!(c().tokenize("").is_empty());
    let src = "s = \"héllo\";\nt = s;";
    let stream = c().tokenize(src);
    assert_eq!(stream.symbols(), "AA");
    for token in stream.tokens() {
        assert!(src.is_char_boundary(token.start()));
        assert!(src.is_char_boundary(token.end()));
    }
}

#[test]
fn test_ternary_return_after_block() {
    let src = "int f(int s) {\n    if (s) { s = 1; }\n    return s > 0 ? s : -s;\n}\n";
    assert_eq!(c().tokenize(src).symbols(), "F{I{A}I{R}I{R}}");
}
