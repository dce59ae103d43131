// tests/unit_ngram.rs
use sourcesleuth_core::ngram::{ngrams, similarity, NgramProfile};

#[test]
fn test_identical_streams() {
    assert_eq!(similarity("F{NAMR}", "F{NAMR}", 4), 100.0);
}

#[test]
fn test_disjoint_streams() {
    assert_eq!(similarity("AMAMAM", "SICIGSG", 4), 0.0);
}

#[test]
fn test_repeated_windows_count_once() {
    let grams = ngrams("AMAMAMAM", 4);
    assert_eq!(grams.len(), 2);
}

#[test]
fn test_profile_sizes() {
    let p = NgramProfile::build("ABCDE", "BCDEF", 3);
    assert_eq!(p.candidate, 3);
    assert_eq!(p.reference, 3);
    assert_eq!(p.shared, 2);
    assert_eq!(p.union, 4);
    assert_eq!(p.score(), 50.0);
}

#[test]
fn test_one_side_too_short() {
    // the short side contributes nothing, the union is the long side
    assert_eq!(similarity("AB", "ABCDEF", 4), 0.0);
}

#[test]
fn test_windows_are_characters_not_bytes() {
    let grams = ngrams("é{}", 2);
    assert!(grams.contains("é{"));
    assert!(grams.contains("{}"));
}

#[test]
fn test_half_percentages_round_to_even() {
    // 1 of 8 and 5 of 8 shared unigrams
    assert_eq!(similarity("A", "ABCDEFGH", 1), 12.0);
    assert_eq!(similarity("ABCDE", "ABCDEFGH", 1), 62.0);
}
