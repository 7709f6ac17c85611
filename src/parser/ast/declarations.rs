use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(type_decls, TypeDecl);

    /// Every enum declaration in the file, nested ones included, in source order
    pub fn enum_decls(&self) -> impl Iterator<Item = EnumDecl> + '_ {
        self.0.descendants().filter_map(EnumDecl::cast)
    }

    /// Enum declarations that are not nested inside another enum declaration
    pub fn outermost_enum_decls(&self) -> impl Iterator<Item = EnumDecl> + '_ {
        self.enum_decls().filter(|decl| {
            !decl
                .syntax()
                .ancestors()
                .skip(1)
                .any(|a| a.kind() == SyntaxKind::ENUM_DECL)
        })
    }
}

// ============================================================================
// Type declarations
// ============================================================================

/// Any type declaration (enum, class or interface)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDecl {
    Enum(EnumDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

impl AstNode for TypeDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::ENUM_DECL | SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ENUM_DECL => Some(Self::Enum(EnumDecl(node))),
            SyntaxKind::CLASS_DECL => Some(Self::Class(ClassDecl(node))),
            SyntaxKind::INTERFACE_DECL => Some(Self::Interface(InterfaceDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Enum(n) => n.syntax(),
            Self::Class(n) => n.syntax(),
            Self::Interface(n) => n.syntax(),
        }
    }
}

ast_node!(EnumDecl, ENUM_DECL);

impl EnumDecl {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(name, Name);
    first_child_method!(super_types, SuperTypes);
    first_child_method!(body, EnumBody);

    /// Constants of the enum body, in declaration order
    pub fn constants(&self) -> impl Iterator<Item = EnumConstant> + '_ {
        self.body()
            .into_iter()
            .flat_map(|body| body.constants().collect::<Vec<_>>())
    }

    /// Members declared after the constant list
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.body()
            .into_iter()
            .flat_map(|body| body.members().collect::<Vec<_>>())
    }
}

ast_node!(ClassDecl, CLASS_DECL);

impl ClassDecl {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(name, Name);
    first_child_method!(super_types, SuperTypes);
    first_child_method!(body, ClassBody);
}

ast_node!(InterfaceDecl, INTERFACE_DECL);

impl InterfaceDecl {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(name, Name);
    first_child_method!(super_types, SuperTypes);
    first_child_method!(body, ClassBody);

    /// Check for the `@interface` form
    pub fn is_annotation_type(&self) -> bool {
        has_token(&self.0, SyntaxKind::AT)
    }
}

// ============================================================================
// Names and modifiers
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| k == SyntaxKind::IDENT)
    }

    pub fn text(&self) -> Option<String> {
        self.ident().map(|t| t.text().to_string())
    }
}

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    /// Identifier segments of the name
    pub fn segments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .collect()
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments().join("."))
    }
}

ast_node!(Modifiers, MODIFIERS);

impl Modifiers {
    has_token_method!(is_abstract, ABSTRACT_KW);
    has_token_method!(is_static, STATIC_KW);
    has_token_method!(is_final, FINAL_KW);
    children_method!(annotations, Annotation);

    /// Modifier keywords and annotations, in source order
    pub fn items(&self) -> impl Iterator<Item = ModifierItem> + '_ {
        self.0.children_with_tokens().filter_map(|e| match e {
            rowan::NodeOrToken::Token(t) if t.kind().is_modifier() => Some(ModifierItem::Keyword(t)),
            rowan::NodeOrToken::Node(n) => Annotation::cast(n).map(ModifierItem::Annotation),
            _ => None,
        })
    }
}

/// One entry of a modifier list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModifierItem {
    Keyword(SyntaxToken),
    Annotation(Annotation),
}

impl ModifierItem {
    pub fn text_range(&self) -> rowan::TextRange {
        match self {
            Self::Keyword(t) => t.text_range(),
            Self::Annotation(a) => a.syntax().text_range(),
        }
    }

    pub fn is_annotation(&self) -> bool {
        matches!(self, Self::Annotation(_))
    }
}

ast_node!(Annotation, ANNOTATION);

impl Annotation {
    first_child_method!(name, QualifiedName);

    /// The `(...)` element list, when present and closed
    pub fn arguments_range(&self) -> Option<rowan::TextRange> {
        let open = find_token(&self.0, |k| k == SyntaxKind::L_PAREN)?;
        let close = self.0.last_token().filter(|t| t.kind() == SyntaxKind::R_PAREN)?;
        Some(open.text_range().cover(close.text_range()))
    }

    /// Comma separated elements of the element list, each spanning its
    /// significant tokens. Nested groups stay inside their element.
    pub fn elements(&self) -> Vec<AnnotationElement> {
        let mut elements = Vec::new();
        let mut current: Option<AnnotationElement> = None;
        let mut depth = 0usize;
        let tokens = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia());
        for token in tokens {
            let kind = token.kind();
            if depth == 0 {
                if kind == SyntaxKind::L_PAREN {
                    depth = 1;
                }
                continue;
            }
            if depth == 1 && (kind == SyntaxKind::COMMA || kind == SyntaxKind::R_PAREN) {
                elements.extend(current.take());
                if kind == SyntaxKind::R_PAREN {
                    break;
                }
                continue;
            }
            if kind.is_opening_delimiter() {
                depth += 1;
            } else if kind.is_closing_delimiter() {
                depth -= 1;
            }
            current = Some(match current {
                None => AnnotationElement {
                    range: token.text_range(),
                    is_literal: kind.is_literal(),
                },
                Some(element) => AnnotationElement {
                    range: element.range.cover(token.text_range()),
                    is_literal: false,
                },
            });
        }
        elements
    }
}

/// One element value of an annotation, e.g. `"unchecked"` or `since = "9"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationElement {
    pub range: rowan::TextRange,
    /// A single literal token
    pub is_literal: bool,
}

ast_node!(SuperTypes, SUPER_TYPES);

impl SuperTypes {
    children_method!(types, TypeRef);
}

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    /// Check whether the type is a bare primitive (or `void`). Arrays of
    /// primitives are reference types.
    pub fn is_primitive(&self) -> bool {
        let mut tokens = self
            .0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia());
        matches!(
            (tokens.next(), tokens.next()),
            (Some(t), None) if t.kind().is_primitive_type()
        )
    }
}

// ============================================================================
// Bodies
// ============================================================================

ast_node!(EnumBody, ENUM_BODY);

impl EnumBody {
    children_method!(constants, EnumConstant);
    children_method!(members, Member);
    has_token_method!(has_closing_brace, R_BRACE);
}

ast_node!(EnumConstant, ENUM_CONSTANT);

impl EnumConstant {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(name, Name);
    first_child_method!(arg_list, ArgList);
    first_child_method!(body, ClassBody);
}

ast_node!(ClassBody, CLASS_BODY);

impl ClassBody {
    children_method!(members, Member);
    has_token_method!(has_closing_brace, R_BRACE);
}
