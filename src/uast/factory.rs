//! Node factory: builds UAST nodes with roles, token and span attached.

use smol_str::SmolStr;
use text_size::TextRange;

use super::error::{Result, UastError};
use super::kind::NodeKind;
use super::node::UastNode;
use super::role::{Role, Vocabulary};
use super::span::PositionMapper;

/// Builds canonical nodes for one source text.
///
/// Construction is pure: roles come from the shared [`Vocabulary`], spans
/// from the [`PositionMapper`], and every node is checked for containment
/// before it is handed out.
#[derive(Debug, Clone)]
pub struct NodeFactory<'s> {
    mapper: PositionMapper<'s>,
    vocabulary: &'static Vocabulary,
}

impl<'s> NodeFactory<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            mapper: PositionMapper::new(source),
            vocabulary: Vocabulary::global(),
        }
    }

    pub fn mapper(&self) -> &PositionMapper<'s> {
        &self.mapper
    }

    /// Build a leaf whose token is the exact source text of `range`
    pub fn leaf(&self, kind: NodeKind, range: TextRange) -> Result<UastNode> {
        if !kind.is_leaf() {
            return Err(UastError::malformed(kind, range, "not a leaf kind"));
        }
        if range.is_empty() {
            return Err(UastError::malformed(kind, range, "empty fragment"));
        }
        let text = self.mapper.text(&kind, range)?;
        let span = self.mapper.span(&kind, range)?;
        let roles = self.vocabulary.roles_for(&kind);
        Ok(UastNode::new(kind, roles, Some(SmolStr::new(text)), Vec::new(), span))
    }

    /// Leaf that additionally carries `role` (e.g. a primitive type reference)
    pub fn leaf_with_role(&self, kind: NodeKind, range: TextRange, role: Role) -> Result<UastNode> {
        let mut node = self.leaf(kind, range)?;
        node.add_role(role);
        Ok(node)
    }

    /// Build an inner node from already built children
    pub fn node(&self, kind: NodeKind, range: TextRange, children: Vec<UastNode>) -> Result<UastNode> {
        if kind.is_leaf() {
            return Err(UastError::malformed(kind, range, "leaf kind cannot own children"));
        }
        self.check_shape(&kind, range, &children)?;
        let span = self.mapper.span(&kind, range)?;
        self.mapper.check_children(&kind, range, &children)?;

        // Declarations and annotations are tokenized by their name
        let token = if kind.takes_name_token() {
            children
                .iter()
                .find(|c| *c.kind() == NodeKind::Identifier)
                .and_then(|c| c.token())
                .map(SmolStr::new)
        } else {
            None
        };
        let roles = self.vocabulary.roles_for(&kind);
        Ok(UastNode::new(kind, roles, token, children, span))
    }

    fn check_shape(&self, kind: &NodeKind, range: TextRange, children: &[UastNode]) -> Result<()> {
        let text = self.mapper.text(kind, range)?;
        match kind {
            NodeKind::Block | NodeKind::AnonymousClass => {
                if !(text.starts_with('{') && text.ends_with('}') && text.len() >= 2) {
                    return Err(UastError::malformed(kind.clone(), range, "expected '{' ... '}'"));
                }
            }
            NodeKind::Arguments => {
                if !(text.starts_with('(') && text.ends_with(')') && text.len() >= 2) {
                    return Err(UastError::malformed(kind.clone(), range, "expected '(' ... ')'"));
                }
            }
            NodeKind::Annotation => {
                if !text.starts_with('@') {
                    return Err(UastError::malformed(kind.clone(), range, "expected '@'"));
                }
            }
            _ => {}
        }
        if kind.takes_name_token() && !children.iter().any(|c| *c.kind() == NodeKind::Identifier) {
            return Err(UastError::malformed(kind.clone(), range, "missing name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_leaf_token_is_source_text() {
        let factory = NodeFactory::new("enum Season {}");
        let ident = factory.leaf(NodeKind::Identifier, range(5, 11)).unwrap();
        assert_eq!(ident.token(), Some("Season"));
        assert!(ident.has_role(Role::Identifier));
    }

    #[test]
    fn test_declaration_roles_and_token() {
        let source = "enum Season {}";
        let factory = NodeFactory::new(source);
        let ident = factory.leaf(NodeKind::Identifier, range(5, 11)).unwrap();
        let decl = factory
            .node(NodeKind::EnumDeclaration, range(0, 14), vec![ident])
            .unwrap();
        assert_eq!(decl.token(), Some("Season"));
        assert!(decl.has_role(Role::Declaration));
        assert!(decl.has_role(Role::Enumeration));
        assert_eq!(decl.text(source), Some(source));
    }

    #[test]
    fn test_block_without_braces_is_malformed() {
        let factory = NodeFactory::new("void f() { return; ");
        let err = factory.node(NodeKind::Block, range(9, 18), Vec::new()).unwrap_err();
        assert!(matches!(err, UastError::MalformedFragment { kind: NodeKind::Block, .. }));
    }

    #[test]
    fn test_annotation_is_tokenized_by_its_name() {
        let source = "@Deprecated enum A {}";
        let factory = NodeFactory::new(source);
        let name = factory.leaf(NodeKind::Identifier, range(1, 11)).unwrap();
        let annotation = factory.node(NodeKind::Annotation, range(0, 11), vec![name]).unwrap();
        assert_eq!(annotation.token(), Some("Deprecated"));
        assert!(annotation.has_role(Role::Annotation));
        assert!(annotation.has_role(Role::Modifier));

        let err = factory.node(NodeKind::Annotation, range(0, 11), Vec::new()).unwrap_err();
        assert!(!err.is_defect());
        let name = factory.leaf(NodeKind::Identifier, range(12, 16)).unwrap();
        assert!(factory.node(NodeKind::Annotation, range(12, 16), vec![name]).is_err());
    }

    #[test]
    fn test_empty_leaf_is_malformed() {
        let factory = NodeFactory::new("enum A {}");
        assert!(factory.leaf(NodeKind::Identifier, range(5, 5)).is_err());
    }

    #[test]
    fn test_unnamed_declaration_is_malformed() {
        let factory = NodeFactory::new("enum A {}");
        let err = factory
            .node(NodeKind::EnumDeclaration, range(0, 9), Vec::new())
            .unwrap_err();
        assert!(!err.is_defect());
    }

    #[test]
    fn test_escaping_child_is_defect() {
        let factory = NodeFactory::new("enum A { X }");
        let ident = factory.leaf(NodeKind::Identifier, range(9, 10)).unwrap();
        let err = factory
            .node(NodeKind::EnumDeclaration, range(0, 6), vec![ident])
            .unwrap_err();
        assert!(err.is_defect());
    }
}
