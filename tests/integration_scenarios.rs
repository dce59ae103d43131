// tests/integration_scenarios.rs
//! End-to-end comparisons of fixture files through the detector.

use sourcesleuth_core::config::Config;
use sourcesleuth_core::engine::{Detail, Detector, Method, Verdict};
use sourcesleuth_core::source::SourceFile;
use std::path::Path;

fn fixture(name: &str) -> SourceFile {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    SourceFile::load(&path).unwrap()
}

fn scores(candidate: &str, reference: &str) -> Vec<Verdict> {
    let detector = Detector::new(&Config::default()).unwrap();
    detector
        .compare_all(&fixture(candidate), &fixture(reference))
        .unwrap()
}

fn score(verdicts: &[Verdict], method: Method) -> f64 {
    verdicts
        .iter()
        .find(|v| v.method == method)
        .map(|v| v.score)
        .unwrap()
}

#[test]
fn test_verbatim_copy_is_full_match() {
    let v = scores("stats.py", "stats.py");
    for method in Method::ALL {
        assert!((score(&v, method) - 100.0).abs() < f64::EPSILON, "{method:?}");
    }
}

#[test]
fn test_renamed_identifiers() {
    let v = scores("stats_renamed.py", "stats.py");
    assert!(score(&v, Method::Tiling) < 30.0);
    assert!(score(&v, Method::Ngram) >= 70.0);
    assert!(score(&v, Method::Tree) >= 70.0);
}

#[test]
fn test_reordered_lines() {
    let v = scores("sums_shuffled.py", "sums.py");
    assert!(score(&v, Method::Tiling) < 50.0);
    assert!(score(&v, Method::Ngram) >= 70.0);
}

#[test]
fn test_unrelated_files() {
    let v = scores("control.py", "sums.py");
    assert_eq!(score(&v, Method::Tiling), 0.0);
    assert_eq!(score(&v, Method::Ngram), 0.0);
    match &v.iter().find(|v| v.method == Method::Ngram).unwrap().detail {
        Detail::Ngram(p) => {
            assert_eq!(p.shared, 0);
            assert!(p.union > 0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_c_sources_without_grammar() {
    let detector = Detector::new(&Config::default()).unwrap();
    let a = fixture("add_renamed.c");
    let b = fixture("add.c");
    let ngram = detector.compare(&a, &b, Method::Ngram).unwrap();
    assert!((ngram.score - 100.0).abs() < f64::EPSILON);
    let err = detector.compare(&a, &b, Method::Tree).unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn test_missing_file_is_reported_before_comparison() {
    let err = SourceFile::load(Path::new("tests/fixtures/absent.py")).unwrap_err();
    assert!(err.is_input_error());
    assert!(err.to_string().contains("absent.py"));
}
