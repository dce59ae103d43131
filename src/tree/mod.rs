// src/tree/mod.rs
//! Syntax trees as the structural comparator consumes them.
//!
//! A node is a kind tag plus ordered named fields; a field holds a scalar, one
//! child or a sequence of children. The tree-sitter provider in [`parse`]
//! produces this shape, and tests can build it by hand.

pub mod compare;
pub mod parse;

pub use compare::{compare, CompareOptions, ScalarPolicy, SequencePolicy, TreeComparison};
pub use parse::parse_source;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
}

/// Primitive kind used by the loose scalar policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Number,
    Bool,
    None,
}

impl Scalar {
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Str(_) => ScalarKind::Text,
            Self::Int(_) | Self::Float(_) => ScalarKind::Number,
            Self::Bool(_) => ScalarKind::Bool,
            Self::None => ScalarKind::None,
        }
    }

    /// Value equality; integers and floats compare numerically.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => *a as f64 == *b,
            _ => self == other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Field {
    Scalar(Scalar),
    Node(SyntaxNode),
    Sequence(Vec<SyntaxNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxNode {
    kind: String,
    fields: Vec<(String, Field)>,
}

impl SyntaxNode {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field append; a repeated name replaces the earlier value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, field: Field) -> Self {
        self.set(name, field);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, field: Field) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((name, field)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, Field)] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_same_name() {
        let node = SyntaxNode::new("x")
            .with("a", Field::Scalar(Scalar::Int(1)))
            .with("a", Field::Scalar(Scalar::Int(2)));
        assert_eq!(node.fields().len(), 1);
        assert_eq!(node.field("a"), Some(&Field::Scalar(Scalar::Int(2))));
    }

    #[test]
    fn numbers_share_a_kind() {
        assert_eq!(Scalar::Int(1).kind(), Scalar::Float(2.5).kind());
        assert!(Scalar::Int(2).same_value(&Scalar::Float(2.0)));
        assert!(!Scalar::Str("a".into()).same_value(&Scalar::Str("b".into())));
    }
}
