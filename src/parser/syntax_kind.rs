//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the Java syntax
//! tree. Only the part of Java needed to describe type declarations and
//! simple method bodies has dedicated kinds; everything else lands in
//! `OPAQUE_STMT` or `ERROR`.

/// All syntax kinds (tokens and nodes) of the Java front-end
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, bodies, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,         // identifier
    INT_NUMBER,    // 42, 0x2A, 42L
    FLOAT_NUMBER,  // 3.14, 1e10, 2.5f
    STRING,        // "hello"
    CHAR,          // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,       // {
    R_BRACE,       // }
    L_PAREN,       // (
    R_PAREN,       // )
    L_BRACKET,     // [
    R_BRACKET,     // ]
    SEMICOLON,     // ;
    COMMA,         // ,
    DOT,           // .
    ELLIPSIS,      // ...
    AT,            // @
    EQ,            // =
    EQ_EQ,         // ==
    BANG_EQ,       // !=
    LT,            // <
    GT,            // >
    LT_EQ,         // <=
    GT_EQ,         // >=
    PLUS,          // +
    MINUS,         // -
    STAR,          // *
    SLASH,         // /
    PERCENT,       // %
    BANG,          // !
    AMP_AMP,       // &&
    PIPE_PIPE,     // ||
    AMP,           // &
    PIPE,          // |
    CARET,         // ^
    TILDE,         // ~
    LT_LT,         // <<
    QUESTION,      // ?
    COLON,         // :
    PLUS_EQ,       // +=
    MINUS_EQ,      // -=
    STAR_EQ,       // *=
    SLASH_EQ,      // /=
    PERCENT_EQ,    // %=
    AMP_EQ,        // &=
    PIPE_EQ,       // |=
    CARET_EQ,      // ^=
    LT_LT_EQ,      // <<=
    PLUS_PLUS,     // ++
    MINUS_MINUS,   // --
    ARROW,         // ->
    COLON_COLON,   // ::

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    // Declarations
    PACKAGE_KW,
    IMPORT_KW,
    ENUM_KW,
    CLASS_KW,
    INTERFACE_KW,
    EXTENDS_KW,
    IMPLEMENTS_KW,
    THROWS_KW,

    // Modifiers
    PUBLIC_KW,
    PROTECTED_KW,
    PRIVATE_KW,
    STATIC_KW,
    FINAL_KW,
    ABSTRACT_KW,
    NATIVE_KW,
    SYNCHRONIZED_KW,
    TRANSIENT_KW,
    VOLATILE_KW,
    STRICTFP_KW,
    DEFAULT_KW,

    // Statements and expressions
    RETURN_KW,
    IF_KW,
    ELSE_KW,
    NEW_KW,
    THIS_KW,
    SUPER_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    INSTANCEOF_KW,

    // Statements kept opaque by the parser
    FOR_KW,
    WHILE_KW,
    DO_KW,
    SWITCH_KW,
    CASE_KW,
    TRY_KW,
    CATCH_KW,
    FINALLY_KW,
    THROW_KW,
    BREAK_KW,
    CONTINUE_KW,
    ASSERT_KW,

    // Primitive types
    VOID_KW,
    BOOLEAN_KW,
    BYTE_KW,
    SHORT_KW,
    INT_KW,
    LONG_KW,
    CHAR_KW,
    FLOAT_KW,
    DOUBLE_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    SOURCE_FILE,
    PACKAGE_DECL,
    IMPORT_DECL,
    QUALIFIED_NAME,

    // Type declarations
    ENUM_DECL,
    CLASS_DECL,
    INTERFACE_DECL,
    MODIFIERS,
    ANNOTATION,
    NAME,
    SUPER_TYPES,
    TYPE_PARAMS,

    // Bodies
    ENUM_BODY,
    ENUM_CONSTANT,
    CLASS_BODY,
    ARG_LIST,

    // Members
    FIELD_DECL,
    VAR_DECLARATOR,
    CONSTRUCTOR_DECL,
    METHOD_DECL,
    PARAM_LIST,
    PARAM,
    THROWS_CLAUSE,
    INITIALIZER,

    // Types
    TYPE_REF,
    TYPE_ARGS,

    // Statements
    BLOCK,
    RETURN_STMT,
    IF_STMT,
    ELSE_BRANCH,
    LOCAL_VAR_STMT,
    EXPR_STMT,
    EMPTY_STMT,
    OPAQUE_STMT,

    // Expressions
    NAME_REF,
    LITERAL,
    THIS_EXPR,
    PAREN_EXPR,
    FIELD_EXPR,
    CALL_EXPR,
    NEW_EXPR,
    BIN_EXPR,
    PREFIX_EXPR,
    ASSIGN_EXPR,
    COND_EXPR,
    CAST_EXPR,
    INDEX_EXPR,
    POSTFIX_EXPR,
    LAMBDA_EXPR,
    METHOD_REF,
    ARRAY_INIT,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PACKAGE_KW as u16) && (self as u16) <= (Self::DOUBLE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::COLON_COLON as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_NUMBER
                | Self::FLOAT_NUMBER
                | Self::STRING
                | Self::CHAR
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Check if this is a declaration modifier keyword
    pub fn is_modifier(self) -> bool {
        (self as u16) >= (Self::PUBLIC_KW as u16) && (self as u16) <= (Self::DEFAULT_KW as u16)
    }

    /// Check if this keyword names a primitive type (or `void`)
    pub fn is_primitive_type(self) -> bool {
        (self as u16) >= (Self::VOID_KW as u16) && (self as u16) <= (Self::DOUBLE_KW as u16)
    }

    /// Check if this keyword starts a statement the parser keeps opaque
    pub fn is_opaque_statement_keyword(self) -> bool {
        (self as u16) >= (Self::FOR_KW as u16) && (self as u16) <= (Self::ASSERT_KW as u16)
    }

    /// Check if this token is `=` or a compound assignment operator
    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
                | Self::STAR_EQ
                | Self::SLASH_EQ
                | Self::PERCENT_EQ
                | Self::AMP_EQ
                | Self::PIPE_EQ
                | Self::CARET_EQ
                | Self::LT_LT_EQ
        )
    }

    /// Check if this is an opening delimiter
    pub fn is_opening_delimiter(self) -> bool {
        matches!(self, Self::L_BRACE | Self::L_PAREN | Self::L_BRACKET)
    }

    /// Closing delimiter matching an opening one
    pub fn closing_delimiter(self) -> Option<SyntaxKind> {
        match self {
            Self::L_BRACE => Some(Self::R_BRACE),
            Self::L_PAREN => Some(Self::R_PAREN),
            Self::L_BRACKET => Some(Self::R_BRACKET),
            _ => None,
        }
    }

    /// Check if this is a closing delimiter
    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, Self::R_BRACE | Self::R_PAREN | Self::R_BRACKET)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaLanguage {}

impl rowan::Language for JavaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<JavaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<JavaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<JavaLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ranges() {
        assert!(SyntaxKind::ENUM_KW.is_keyword());
        assert!(SyntaxKind::DOUBLE_KW.is_keyword());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(SyntaxKind::ABSTRACT_KW.is_modifier());
        assert!(!SyntaxKind::ENUM_KW.is_modifier());
        assert!(SyntaxKind::BOOLEAN_KW.is_primitive_type());
        assert!(SyntaxKind::COLON.is_punct());
        assert!(SyntaxKind::COLON_COLON.is_punct());
        assert!(SyntaxKind::PLUS_EQ.is_assignment_op());
        assert!(SyntaxKind::LT_LT_EQ.is_assignment_op());
        assert!(!SyntaxKind::EQ_EQ.is_assignment_op());
        assert!(SyntaxKind::TILDE.is_punct());
        assert!(!SyntaxKind::PACKAGE_KW.is_punct());
    }

    #[test]
    fn test_raw_roundtrip() {
        for kind in [SyntaxKind::WHITESPACE, SyntaxKind::ENUM_DECL, SyntaxKind::ERROR] {
            let raw: rowan::SyntaxKind = kind.into();
            assert_eq!(SyntaxKind::from(raw), kind);
        }
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(SyntaxKind::L_BRACE.closing_delimiter(), Some(SyntaxKind::R_BRACE));
        assert_eq!(SyntaxKind::SEMICOLON.closing_delimiter(), None);
        assert!(SyntaxKind::R_PAREN.is_closing_delimiter());
    }
}
