// src/tree/parse.rs
//! Tree-sitter as the syntax tree provider.

use super::{Field, Scalar, SyntaxNode};
use crate::error::{Result, SleuthError};
use crate::source::SourceFile;
use tree_sitter::{Node, Parser};

const CHILDREN: &str = "children";

/// Parses a loaded file with the grammar matching its extension.
///
/// # Errors
/// `UnsupportedLanguage` when no grammar matches, `Parse` if tree-sitter
/// cannot produce a tree.
pub fn parse_source(file: &SourceFile) -> Result<SyntaxNode> {
    let lang = file.lang().ok_or_else(|| {
        SleuthError::UnsupportedLanguage(
            file.path()
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("<none>")
                .to_string(),
        )
    })?;

    let mut parser = Parser::new();
    parser
        .set_language(lang.grammar())
        .map_err(|e| SleuthError::Parse {
            path: file.path().to_path_buf(),
            reason: e.to_string(),
        })?;
    let tree = parser
        .parse(file.text(), None)
        .ok_or_else(|| SleuthError::Parse {
            path: file.path().to_path_buf(),
            reason: "parser produced no tree".into(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::warn!(path = %file.path().display(), "syntax errors; comparing the recovered tree");
    }
    Ok(convert(root, file.text().as_bytes()))
}

fn is_comment(node: Node) -> bool {
    node.kind().ends_with("comment")
}

fn convert(node: Node, source: &[u8]) -> SyntaxNode {
    let mut out = SyntaxNode::new(node.kind());
    let mut groups: Vec<(&'static str, Vec<SyntaxNode>)> = Vec::new();

    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            let field = cursor.field_name();
            if !is_comment(child) {
                let converted = match (field, child.is_named()) {
                    (_, true) => Some(convert(child, source)),
                    // operators and keywords reached through a field
                    (Some(_), false) => Some(SyntaxNode::new(child.kind())),
                    (None, false) => None,
                };
                if let Some(converted) = converted {
                    let name = field.unwrap_or(CHILDREN);
                    match groups.iter_mut().find(|(n, _)| *n == name) {
                        Some((_, nodes)) => nodes.push(converted),
                        None => groups.push((name, vec![converted])),
                    }
                }
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    for (name, mut nodes) in groups {
        let field = if name != CHILDREN && nodes.len() == 1 {
            match nodes.pop() {
                Some(only) => Field::Node(only),
                None => continue,
            }
        } else {
            Field::Sequence(nodes)
        };
        out.set(name, field);
    }

    if node.is_named() && node.child_count() == 0 {
        if let Ok(text) = node.utf8_text(source) {
            out.set("text", Field::Scalar(leaf_value(node.kind(), text)));
        }
    }
    out
}

fn leaf_value(kind: &str, text: &str) -> Scalar {
    let numeric = kind.contains("integer") || kind.contains("float") || kind == "number";
    if numeric {
        let cleaned: String = text.chars().filter(|c| *c != '_').collect();
        if let Ok(i) = cleaned.parse::<i64>() {
            return Scalar::Int(i);
        }
        if let Ok(f) = cleaned.parse::<f64>() {
            return Scalar::Float(f);
        }
    }
    match kind {
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        "none" | "null" | "undefined" => Scalar::None,
        "boolean_literal" => Scalar::Bool(text == "true"),
        _ => Scalar::Str(text.to_string()),
    }
}
