//! Assertion helpers over normalized trees.

use rustc_hash::FxHashSet;
use uast::parser::tokenize;
use uast::{EnumNormalization, NodeKind, NormalizerConfig, TextSize, UastNode, normalize_source};

/// Normalize `source` and return its only enum declaration
pub fn normalize_single(source: &str) -> EnumNormalization {
    let file = normalize_source(source, &NormalizerConfig::default());
    assert!(
        file.syntax_errors.is_empty(),
        "unexpected syntax errors: {:?}",
        file.syntax_errors
    );
    assert_eq!(file.declarations.len(), 1, "expected one enum declaration");
    match file.declarations.into_iter().next() {
        Some(Ok(result)) => result,
        Some(Err(err)) => panic!("normalization failed: {err}"),
        None => unreachable!(),
    }
}

/// Names of the constants, in output order
pub fn constant_names(result: &EnumNormalization) -> Vec<String> {
    result
        .constants()
        .map(|c| c.name().unwrap_or_default().to_string())
        .collect()
}

/// Kind names of a node's children
pub fn child_kinds(node: &UastNode) -> Vec<String> {
    node.children().iter().map(|c| c.kind().name().to_string()).collect()
}

/// Every parent contains its children, which follow each other without overlap
pub fn assert_containment(root: &UastNode) {
    for node in root.descendants() {
        let mut previous_end = None;
        for child in node.children() {
            assert!(
                node.range().contains_range(child.range()),
                "{} {:?} escapes {} {:?}",
                child.kind(),
                child.range(),
                node.kind(),
                node.range()
            );
            if let Some(end) = previous_end {
                assert!(child.range().start() >= end, "{} overlaps its sibling", child.kind());
            }
            previous_end = Some(child.range().end());
        }
    }
}

/// Every node maps back to its source text and starts and ends on the
/// boundary of a significant token, so no comment or whitespace is ever
/// glued to either end. Leaf tokens equal their text and named nodes carry
/// the text of their `Identifier` child.
pub fn assert_round_trip(root: &UastNode, source: &str) {
    let tokens: Vec<_> = tokenize(source)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .collect();
    let starts: FxHashSet<TextSize> = tokens.iter().map(|t| t.offset).collect();
    let ends: FxHashSet<TextSize> = tokens
        .iter()
        .map(|t| t.offset + TextSize::of(t.text))
        .collect();

    for node in root.descendants() {
        let range = node.range();
        let text = node
            .text(source)
            .unwrap_or_else(|| panic!("{} span outside source", node.kind()));
        assert_eq!(text, &source[range]);
        assert!(
            starts.contains(&range.start()),
            "{} {:?} does not start on a token: {:?}",
            node.kind(),
            range,
            text
        );
        assert!(
            ends.contains(&range.end()),
            "{} {:?} does not end on a token: {:?}",
            node.kind(),
            range,
            text
        );

        if node.kind().is_leaf() {
            assert_eq!(node.token(), Some(text), "leaf token differs from source");
        }
        if node.kind().takes_name_token() {
            let name = node
                .children()
                .iter()
                .find(|c| *c.kind() == NodeKind::Identifier)
                .unwrap_or_else(|| panic!("{} without a name", node.kind()));
            assert!(range.contains_range(name.range()));
            assert_eq!(node.token(), name.token(), "{} token is not its name", node.kind());
        }
    }
}
