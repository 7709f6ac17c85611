//! Java implementation of the front-end capabilities over the rowan CST.

use super::{
    AnnotationInfo, AnnotationValue, Declarator, Delimited, FragmentShape, Frontend, Malformation,
    ModifierInfo, TypeInfo,
};
use crate::parser::{
    Annotation, ArgList, AstNode, Block, ClassBody, EnumDecl, Expr, IfStmt, MethodDecl,
    ModifierItem, Modifiers, Name, Param, Stmt, SyntaxKind, SyntaxNode, TypeRef, VarDeclarator,
};
use text_size::TextRange;

/// Front-end over CSTs produced by [`parse_java`](crate::parser::parse_java)
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaFrontend;

const IMPLICIT_SUPERTYPE: &str = "java.lang.Enum";

fn trimmed_range(node: &SyntaxNode) -> TextRange {
    let mut tokens = node
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia());
    let Some(first) = tokens.next() else {
        return TextRange::empty(node.text_range().start());
    };
    let last = tokens.last().unwrap_or_else(|| first.clone());
    TextRange::new(first.text_range().start(), last.text_range().end())
}

fn last_significant_kind(node: &SyntaxNode) -> Option<SyntaxKind> {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .last()
        .map(|t| t.kind())
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn name_range(name: Option<Name>) -> Option<TextRange> {
    name.and_then(|n| n.ident()).map(|t| t.text_range())
}

fn delimited_block(block: Block) -> Delimited<SyntaxNode> {
    let items = block
        .syntax()
        .children()
        .filter(|c| Stmt::can_cast(c.kind()) || c.kind() == SyntaxKind::ERROR)
        .collect();
    Delimited {
        range: trimmed_range(block.syntax()),
        items,
    }
}

fn delimited_class_body(body: ClassBody) -> Delimited<SyntaxNode> {
    Delimited {
        range: trimmed_range(body.syntax()),
        items: body.members().map(|m| m.syntax().clone()).collect(),
    }
}

fn delimited_args(args: ArgList) -> Delimited<SyntaxNode> {
    Delimited {
        range: trimmed_range(args.syntax()),
        items: args.args().map(|a| a.syntax().clone()).collect(),
    }
}

fn annotation_info(annotation: &Annotation) -> AnnotationInfo {
    let arguments = annotation.arguments_range().map(|range| Delimited {
        range,
        items: annotation
            .elements()
            .into_iter()
            .map(|e| AnnotationValue {
                range: e.range,
                literal: e.is_literal,
            })
            .collect(),
    });
    AnnotationInfo {
        name: annotation.name().map(|n| trimmed_range(n.syntax())),
        arguments,
    }
}

fn malformed(node: &SyntaxNode, reason: impl Into<String>) -> Malformation {
    Malformation {
        range: trimmed_range(node),
        reason: reason.into(),
    }
}

impl Frontend for JavaFrontend {
    type Fragment = SyntaxNode;

    fn language(&self) -> &'static str {
        "java"
    }

    fn implicit_supertype(&self) -> &str {
        IMPLICIT_SUPERTYPE
    }

    fn enum_declarations(&self, root: &SyntaxNode) -> Vec<SyntaxNode> {
        root.descendants()
            .filter(|n| n.kind() == SyntaxKind::ENUM_DECL)
            .filter(|n| {
                !n.ancestors()
                    .skip(1)
                    .take_while(|a| a != root)
                    .any(|a| a.kind() == SyntaxKind::ENUM_DECL)
            })
            .collect()
    }

    fn shape(&self, fragment: &SyntaxNode) -> FragmentShape {
        match fragment.kind() {
            SyntaxKind::ENUM_DECL => FragmentShape::EnumDeclaration,
            SyntaxKind::CLASS_DECL => FragmentShape::ClassDeclaration,
            SyntaxKind::INTERFACE_DECL => FragmentShape::InterfaceDeclaration,
            SyntaxKind::ENUM_CONSTANT => FragmentShape::EnumConstant,
            SyntaxKind::FIELD_DECL => FragmentShape::Field,
            SyntaxKind::CONSTRUCTOR_DECL => FragmentShape::Constructor,
            SyntaxKind::METHOD_DECL => FragmentShape::Method,
            SyntaxKind::INITIALIZER => FragmentShape::Initializer,
            SyntaxKind::BLOCK => FragmentShape::Block,
            SyntaxKind::RETURN_STMT => FragmentShape::Return,
            SyntaxKind::IF_STMT => FragmentShape::If,
            SyntaxKind::LOCAL_VAR_STMT => FragmentShape::LocalVariable,
            SyntaxKind::EXPR_STMT => FragmentShape::ExpressionStatement,
            SyntaxKind::ASSIGN_EXPR => FragmentShape::Assignment,
            SyntaxKind::BIN_EXPR => FragmentShape::Binary,
            SyntaxKind::PREFIX_EXPR | SyntaxKind::POSTFIX_EXPR => FragmentShape::Unary,
            SyntaxKind::CALL_EXPR => FragmentShape::Call,
            SyntaxKind::FIELD_EXPR => FragmentShape::FieldAccess,
            SyntaxKind::NEW_EXPR => FragmentShape::ObjectCreation,
            SyntaxKind::LITERAL => FragmentShape::Literal,
            SyntaxKind::NAME_REF => FragmentShape::Name,
            SyntaxKind::THIS_EXPR => FragmentShape::This,
            SyntaxKind::EMPTY_STMT => FragmentShape::Opaque("empty"),
            SyntaxKind::OPAQUE_STMT => FragmentShape::Opaque("statement"),
            SyntaxKind::PAREN_EXPR => FragmentShape::Opaque("parenthesized"),
            SyntaxKind::COND_EXPR => FragmentShape::Opaque("conditional"),
            SyntaxKind::CAST_EXPR => FragmentShape::Opaque("cast"),
            SyntaxKind::INDEX_EXPR => FragmentShape::Opaque("index"),
            SyntaxKind::LAMBDA_EXPR => FragmentShape::Opaque("lambda"),
            SyntaxKind::METHOD_REF => FragmentShape::Opaque("method_reference"),
            SyntaxKind::ARRAY_INIT => FragmentShape::Opaque("array_initializer"),
            SyntaxKind::ERROR => FragmentShape::Opaque("error"),
            _ => FragmentShape::Opaque("unknown"),
        }
    }

    fn range(&self, fragment: &SyntaxNode) -> TextRange {
        trimmed_range(fragment)
    }

    fn check_well_formed(&self, fragment: &SyntaxNode) -> Result<(), Malformation> {
        for node in fragment.descendants() {
            match node.kind() {
                SyntaxKind::ENUM_BODY | SyntaxKind::CLASS_BODY | SyntaxKind::BLOCK => {
                    if last_significant_kind(&node) != Some(SyntaxKind::R_BRACE) {
                        return Err(malformed(&node, "unbalanced braces: missing '}'"));
                    }
                }
                SyntaxKind::ARG_LIST | SyntaxKind::PARAM_LIST => {
                    if last_significant_kind(&node) != Some(SyntaxKind::R_PAREN) {
                        return Err(malformed(&node, "unbalanced parentheses: missing ')'"));
                    }
                }
                SyntaxKind::ENUM_DECL => {
                    if !node.children().any(|c| c.kind() == SyntaxKind::ENUM_BODY) {
                        return Err(malformed(&node, "enum declaration without body"));
                    }
                }
                SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL => {
                    if !node.children().any(|c| c.kind() == SyntaxKind::CLASS_BODY) {
                        return Err(malformed(&node, "type declaration without body"));
                    }
                }
                SyntaxKind::METHOD_DECL | SyntaxKind::CONSTRUCTOR_DECL => {
                    if !node.children().any(|c| c.kind() == SyntaxKind::PARAM_LIST) {
                        return Err(malformed(&node, "callable declaration without parameters"));
                    }
                }
                SyntaxKind::ERROR => {
                    let in_block = node.parent().is_some_and(|p| p.kind() == SyntaxKind::BLOCK);
                    if !in_block {
                        return Err(malformed(&node, "unparsable tokens in declaration"));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn name(&self, fragment: &SyntaxNode) -> Option<TextRange> {
        match fragment.kind() {
            // The receiver is the first child; an incomplete access has no member name
            SyntaxKind::FIELD_EXPR => fragment
                .children()
                .skip(1)
                .filter(|c| c.kind() == SyntaxKind::NAME_REF)
                .last()
                .map(|n| trimmed_range(&n)),
            _ => name_range(child::<Name>(fragment)),
        }
    }

    fn modifiers(&self, fragment: &SyntaxNode) -> Vec<ModifierInfo> {
        if fragment.kind() == SyntaxKind::INITIALIZER {
            return fragment
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .filter(|t| t.kind() == SyntaxKind::STATIC_KW)
                .map(|t| ModifierInfo::keyword(t.text_range()))
                .collect();
        }
        child::<Modifiers>(fragment)
            .map(|m| {
                m.items()
                    .map(|item| match item {
                        ModifierItem::Keyword(t) => ModifierInfo::keyword(t.text_range()),
                        ModifierItem::Annotation(a) => ModifierInfo {
                            range: trimmed_range(a.syntax()),
                            annotation: Some(annotation_info(&a)),
                        },
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_abstract(&self, fragment: &SyntaxNode) -> bool {
        match MethodDecl::cast(fragment.clone()) {
            Some(method) => method.is_abstract(),
            None => child::<Modifiers>(fragment).is_some_and(|m| m.is_abstract()),
        }
    }

    fn super_types(&self, fragment: &SyntaxNode) -> Vec<TextRange> {
        fragment
            .children()
            .filter(|c| c.kind() == SyntaxKind::SUPER_TYPES)
            .flat_map(|c| c.children().filter(|t| t.kind() == SyntaxKind::TYPE_REF).collect::<Vec<_>>())
            .map(|t| trimmed_range(&t))
            .collect()
    }

    fn constants(&self, fragment: &SyntaxNode) -> Vec<SyntaxNode> {
        EnumDecl::cast(fragment.clone())
            .map(|decl| decl.constants().map(|c| c.syntax().clone()).collect())
            .unwrap_or_default()
    }

    fn members(&self, fragment: &SyntaxNode) -> Vec<SyntaxNode> {
        match fragment.kind() {
            SyntaxKind::ENUM_DECL => EnumDecl::cast(fragment.clone())
                .map(|decl| decl.members().map(|m| m.syntax().clone()).collect())
                .unwrap_or_default(),
            SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL => child::<ClassBody>(fragment)
                .map(|body| delimited_class_body(body).items)
                .unwrap_or_default(),
            SyntaxKind::CLASS_BODY => ClassBody::cast(fragment.clone())
                .map(|body| delimited_class_body(body).items)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn arguments(&self, fragment: &SyntaxNode) -> Option<Delimited<SyntaxNode>> {
        match fragment.kind() {
            SyntaxKind::ENUM_CONSTANT | SyntaxKind::CALL_EXPR | SyntaxKind::NEW_EXPR => {
                child::<ArgList>(fragment).map(delimited_args)
            }
            _ => None,
        }
    }

    fn class_body(&self, fragment: &SyntaxNode) -> Option<Delimited<SyntaxNode>> {
        match fragment.kind() {
            SyntaxKind::ENUM_CONSTANT | SyntaxKind::NEW_EXPR => {
                child::<ClassBody>(fragment).map(delimited_class_body)
            }
            _ => None,
        }
    }

    fn parameters(&self, fragment: &SyntaxNode) -> Vec<SyntaxNode> {
        fragment
            .children()
            .filter(|c| c.kind() == SyntaxKind::PARAM_LIST)
            .flat_map(|list| list.children().filter_map(Param::cast).collect::<Vec<_>>())
            .map(|p| p.syntax().clone())
            .collect()
    }

    fn type_ref(&self, fragment: &SyntaxNode) -> Option<TypeInfo> {
        child::<TypeRef>(fragment).map(|t| TypeInfo {
            range: trimmed_range(t.syntax()),
            primitive: t.is_primitive(),
        })
    }

    fn body(&self, fragment: &SyntaxNode) -> Option<Delimited<SyntaxNode>> {
        match fragment.kind() {
            SyntaxKind::BLOCK => Block::cast(fragment.clone()).map(delimited_block),
            SyntaxKind::METHOD_DECL | SyntaxKind::CONSTRUCTOR_DECL | SyntaxKind::INITIALIZER => {
                child::<Block>(fragment).map(delimited_block)
            }
            _ => None,
        }
    }

    fn declarators(&self, fragment: &SyntaxNode) -> Vec<Declarator<SyntaxNode>> {
        fragment
            .children()
            .filter_map(VarDeclarator::cast)
            .filter_map(|d| {
                let name = name_range(d.name())?;
                let initializer = d.initializer().map(|e| e.syntax().clone());
                Some(Declarator { name, initializer })
            })
            .collect()
    }

    fn operands(&self, fragment: &SyntaxNode) -> Vec<SyntaxNode> {
        match fragment.kind() {
            SyntaxKind::IF_STMT => {
                let Some(stmt) = IfStmt::cast(fragment.clone()) else {
                    return Vec::new();
                };
                let mut operands = Vec::new();
                operands.extend(stmt.condition().map(|e| e.syntax().clone()));
                operands.extend(stmt.then_branch().map(|s| s.syntax().clone()));
                operands.extend(
                    stmt.else_branch()
                        .and_then(|e| e.stmt())
                        .map(|s| s.syntax().clone()),
                );
                operands
            }
            SyntaxKind::CALL_EXPR | SyntaxKind::FIELD_EXPR => {
                fragment.children().filter_map(Expr::cast).take(1).map(|e| e.syntax().clone()).collect()
            }
            _ => fragment
                .children()
                .filter_map(Expr::cast)
                .map(|e| e.syntax().clone())
                .collect(),
        }
    }

    fn operator(&self, fragment: &SyntaxNode) -> Option<TextRange> {
        Expr::cast(fragment.clone())
            .and_then(|e| e.operator_range())
    }
}
