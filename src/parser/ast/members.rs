use super::*;

// ============================================================================
// Members
// ============================================================================

/// Any member of an enum or class body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(FieldDecl),
    Constructor(ConstructorDecl),
    Method(MethodDecl),
    Initializer(Initializer),
    Type(TypeDecl),
}

impl AstNode for Member {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::FIELD_DECL
                | SyntaxKind::CONSTRUCTOR_DECL
                | SyntaxKind::METHOD_DECL
                | SyntaxKind::INITIALIZER
        ) || TypeDecl::can_cast(kind)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::FIELD_DECL => Some(Self::Field(FieldDecl(node))),
            SyntaxKind::CONSTRUCTOR_DECL => Some(Self::Constructor(ConstructorDecl(node))),
            SyntaxKind::METHOD_DECL => Some(Self::Method(MethodDecl(node))),
            SyntaxKind::INITIALIZER => Some(Self::Initializer(Initializer(node))),
            _ => TypeDecl::cast(node).map(Self::Type),
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Field(n) => n.syntax(),
            Self::Constructor(n) => n.syntax(),
            Self::Method(n) => n.syntax(),
            Self::Initializer(n) => n.syntax(),
            Self::Type(n) => n.syntax(),
        }
    }
}

ast_node!(FieldDecl, FIELD_DECL);

impl FieldDecl {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(ty, TypeRef);
    children_method!(declarators, VarDeclarator);
}

ast_node!(VarDeclarator, VAR_DECLARATOR);

impl VarDeclarator {
    first_child_method!(name, Name);
    first_child_method!(initializer, Expr);
}

ast_node!(ConstructorDecl, CONSTRUCTOR_DECL);

impl ConstructorDecl {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(name, Name);
    first_child_method!(param_list, ParamList);
    first_child_method!(body, Block);

    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.param_list()
            .into_iter()
            .flat_map(|list| list.params().collect::<Vec<_>>())
    }
}

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(return_type, TypeRef);
    first_child_method!(name, Name);
    first_child_method!(param_list, ParamList);
    first_child_method!(body, Block);

    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.param_list()
            .into_iter()
            .flat_map(|list| list.params().collect::<Vec<_>>())
    }

    /// Declared `abstract` and without a body
    pub fn is_abstract(&self) -> bool {
        self.body().is_none() && self.modifiers().is_some_and(|m| m.is_abstract())
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    children_method!(params, Param);
    has_token_method!(has_closing_paren, R_PAREN);
}

ast_node!(Param, PARAM);

impl Param {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(ty, TypeRef);
    first_child_method!(name, Name);
    has_token_method!(is_varargs, ELLIPSIS);
}

ast_node!(Initializer, INITIALIZER);

impl Initializer {
    has_token_method!(is_static, STATIC_KW);
    first_child_method!(body, Block);

    pub fn static_token(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| k == SyntaxKind::STATIC_KW)
    }
}
