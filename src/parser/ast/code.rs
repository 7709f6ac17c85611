use super::*;

// ============================================================================
// Statements
// ============================================================================

ast_node!(Block, BLOCK);

impl Block {
    children_method!(statements, Stmt);
    has_token_method!(has_closing_brace, R_BRACE);
}

/// A statement inside a block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Block(Block),
    Return(ReturnStmt),
    If(IfStmt),
    LocalVar(LocalVarStmt),
    Expr(ExprStmt),
    Empty(EmptyStmt),
    Opaque(OpaqueStmt),
    TypeDecl(TypeDecl),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::BLOCK
                | SyntaxKind::RETURN_STMT
                | SyntaxKind::IF_STMT
                | SyntaxKind::LOCAL_VAR_STMT
                | SyntaxKind::EXPR_STMT
                | SyntaxKind::EMPTY_STMT
                | SyntaxKind::OPAQUE_STMT
        ) || TypeDecl::can_cast(kind)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::BLOCK => Some(Self::Block(Block(node))),
            SyntaxKind::RETURN_STMT => Some(Self::Return(ReturnStmt(node))),
            SyntaxKind::IF_STMT => Some(Self::If(IfStmt(node))),
            SyntaxKind::LOCAL_VAR_STMT => Some(Self::LocalVar(LocalVarStmt(node))),
            SyntaxKind::EXPR_STMT => Some(Self::Expr(ExprStmt(node))),
            SyntaxKind::EMPTY_STMT => Some(Self::Empty(EmptyStmt(node))),
            SyntaxKind::OPAQUE_STMT => Some(Self::Opaque(OpaqueStmt(node))),
            _ => TypeDecl::cast(node).map(Self::TypeDecl),
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Block(n) => n.syntax(),
            Self::Return(n) => n.syntax(),
            Self::If(n) => n.syntax(),
            Self::LocalVar(n) => n.syntax(),
            Self::Expr(n) => n.syntax(),
            Self::Empty(n) => n.syntax(),
            Self::Opaque(n) => n.syntax(),
            Self::TypeDecl(n) => n.syntax(),
        }
    }
}

ast_node!(ReturnStmt, RETURN_STMT);

impl ReturnStmt {
    first_child_method!(expr, Expr);
}

ast_node!(IfStmt, IF_STMT);

impl IfStmt {
    first_child_method!(condition, Expr);
    first_child_method!(then_branch, Stmt);
    first_child_method!(else_branch, ElseBranch);
}

ast_node!(ElseBranch, ELSE_BRANCH);

impl ElseBranch {
    first_child_method!(stmt, Stmt);
}

ast_node!(LocalVarStmt, LOCAL_VAR_STMT);

impl LocalVarStmt {
    first_child_method!(modifiers, Modifiers);
    first_child_method!(ty, TypeRef);
    children_method!(declarators, VarDeclarator);
}

ast_node!(ExprStmt, EXPR_STMT);

impl ExprStmt {
    first_child_method!(expr, Expr);
}

ast_node!(EmptyStmt, EMPTY_STMT);
ast_node!(OpaqueStmt, OPAQUE_STMT);

// ============================================================================
// Expressions
// ============================================================================

/// Any expression node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr(SyntaxNode);

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::NAME_REF
                | SyntaxKind::LITERAL
                | SyntaxKind::THIS_EXPR
                | SyntaxKind::PAREN_EXPR
                | SyntaxKind::FIELD_EXPR
                | SyntaxKind::CALL_EXPR
                | SyntaxKind::NEW_EXPR
                | SyntaxKind::BIN_EXPR
                | SyntaxKind::PREFIX_EXPR
                | SyntaxKind::POSTFIX_EXPR
                | SyntaxKind::ASSIGN_EXPR
                | SyntaxKind::COND_EXPR
                | SyntaxKind::CAST_EXPR
                | SyntaxKind::INDEX_EXPR
                | SyntaxKind::LAMBDA_EXPR
                | SyntaxKind::METHOD_REF
                | SyntaxKind::ARRAY_INIT
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl Expr {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// Direct sub-expressions, in source order
    pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }

    /// The operator token of a binary, prefix, postfix or assignment expression
    pub fn operator(&self) -> Option<SyntaxToken> {
        match self.kind() {
            SyntaxKind::BIN_EXPR
            | SyntaxKind::PREFIX_EXPR
            | SyntaxKind::POSTFIX_EXPR
            | SyntaxKind::ASSIGN_EXPR => find_token(&self.0, |k| {
                (k.is_punct() && !k.is_opening_delimiter() && !k.is_closing_delimiter())
                    || k == SyntaxKind::INSTANCEOF_KW
            }),
            _ => None,
        }
    }

    /// Range of the operator; `>>`, `>>>` and their assignments span
    /// several adjacent `>` tokens
    pub fn operator_range(&self) -> Option<rowan::TextRange> {
        let first = self.operator()?;
        let mut range = first.text_range();
        if first.kind() != SyntaxKind::GT {
            return Some(range);
        }
        let mut next = first.next_sibling_or_token();
        while let Some(token) = next.and_then(|e| e.into_token()) {
            if !matches!(token.kind(), SyntaxKind::GT | SyntaxKind::GT_EQ)
                || token.text_range().start() != range.end()
            {
                break;
            }
            range = range.cover(token.text_range());
            next = token.next_sibling_or_token();
        }
        Some(range)
    }

    /// Argument list of a call or `new` expression
    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }

    /// Type of a `new`, cast or `instanceof` expression
    pub fn type_ref(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    /// Anonymous class body of a `new` expression
    pub fn class_body(&self) -> Option<ClassBody> {
        self.0.children().find_map(ClassBody::cast)
    }

    /// Member name of a field access or method reference
    pub fn name_ref(&self) -> Option<SyntaxNode> {
        match self.kind() {
            SyntaxKind::FIELD_EXPR | SyntaxKind::METHOD_REF => self
                .0
                .children()
                .filter(|c| c.kind() == SyntaxKind::NAME_REF)
                .last(),
            _ => None,
        }
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    children_method!(args, Expr);
    has_token_method!(has_closing_paren, R_PAREN);
}
