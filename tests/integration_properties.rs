// tests/integration_properties.rs
//! Properties that hold for every input.

use proptest::prelude::*;
use sourcesleuth_core::lang::Dialect;
use sourcesleuth_core::ngram::similarity;
use sourcesleuth_core::tiling::tile_symbols;
use sourcesleuth_core::tokenize::Tokenizer;
use sourcesleuth_core::tree::{
    compare, CompareOptions, Field, Scalar, ScalarPolicy, SequencePolicy, SyntaxNode,
};

const SOURCE_CHARS: &str = "[a-z0-9 =+*/%<>!&|?:;,.(){}\\[\\]\"'#\n\t-]{0,120}";

fn arb_tree() -> impl Strategy<Value = SyntaxNode> {
    let leaf = ("[a-d]{1,3}", any::<i64>()).prop_map(|(kind, value)| {
        SyntaxNode::new(kind).with("value", Field::Scalar(Scalar::Int(value)))
    });
    leaf.prop_recursive(4, 48, 4, |inner| {
        ("[a-d]{1,3}", prop::collection::vec(inner.clone(), 0..4), inner).prop_map(
            |(kind, body, head)| {
                SyntaxNode::new(kind)
                    .with("head", Field::Node(head))
                    .with("body", Field::Sequence(body))
            },
        )
    })
}

fn arb_options() -> impl Strategy<Value = CompareOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(s, t)| CompareOptions {
        scalars: if s { ScalarPolicy::Strict } else { ScalarPolicy::Loose },
        sequences: if t { SequencePolicy::Truncate } else { SequencePolicy::Penalize },
    })
}

proptest! {
    #[test]
    fn test_tokens_are_deterministic_and_disjoint(src in SOURCE_CHARS, python in any::<bool>()) {
        let dialect = if python { Dialect::Python } else { Dialect::CFamily };
        let tokenizer = Tokenizer::for_dialect(dialect).unwrap();
        let first = tokenizer.tokenize(&src);
        let second = tokenizer.tokenize(&src);
        prop_assert_eq!(first.symbols(), second.symbols());

        let spans: Vec<_> = first.tokens().iter().filter(|t| !t.is_marker()).collect();
        for pair in spans.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start());
        }
        for t in first.tokens() {
            prop_assert!(t.start() <= t.end() && t.end() <= src.len());
        }
    }

    #[test]
    fn test_tiles_are_long_enough_and_disjoint(
        a in "[abc]{0,40}",
        b in "[abc]{0,40}",
        min_run in 1usize..5,
    ) {
        let t = tile_symbols(&a, &b, min_run);
        let mut used_a = vec![false; a.len()];
        let mut used_b = vec![false; b.len()];
        for m in &t.matches {
            prop_assert!(m.len >= min_run);
            for i in 0..m.len {
                prop_assert!(!used_a[m.candidate + i]);
                prop_assert!(!used_b[m.reference + i]);
                used_a[m.candidate + i] = true;
                used_b[m.reference + i] = true;
                prop_assert_eq!(a.as_bytes()[m.candidate + i], b.as_bytes()[m.reference + i]);
            }
        }
        prop_assert!(t.matched_weight <= a.len().min(b.len()));
        prop_assert!((0.0..=100.0).contains(&t.score()));
    }

    #[test]
    fn test_ngram_is_symmetric(a in "[A-G]{0,30}", b in "[A-G]{0,30}", n in 0usize..6) {
        prop_assert_eq!(similarity(&a, &b, n), similarity(&b, &a, n));
        let s = similarity(&a, &b, n);
        prop_assert!((0.0..=100.0).contains(&s));
    }

    #[test]
    fn test_ngram_self_similarity(a in "[A-G]{6,30}", n in 1usize..6) {
        prop_assert_eq!(similarity(&a, &a, n), 100.0);
        prop_assert_eq!(similarity(&a, &a, 0), 0.0);
    }

    #[test]
    fn test_tree_equals_itself(t in arb_tree(), options in arb_options()) {
        let r = compare(&t, &t, options);
        prop_assert_eq!(r.mismatches, 0);
        prop_assert!(r.identical);
        prop_assert!((r.similarity() - 100.0).abs() < f64::EPSILON);
    }
}
