//! Parse context tracking for context-aware error messages
//!
//! The parser keeps a stack of contexts so errors can say where in the
//! source structure they occurred, and so recovery knows where to stop.

use crate::parser::SyntaxKind;

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// At the top level of a file
    #[default]
    TopLevel,
    /// Inside an enum body (constants and members)
    EnumBody,
    /// Inside a class or interface body
    ClassBody,
    /// Inside a statement block
    Block,
    /// Parsing a parameter list
    ParameterList,
    /// Parsing an argument list
    ArgumentList,
    /// Parsing an expression
    Expression,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::EnumBody => "in enum body",
            Self::ClassBody => "in class body",
            Self::Block => "in block",
            Self::ParameterList => "in parameter list",
            Self::ArgumentList => "in argument list",
            Self::Expression => "in expression",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "a package, import, or type declaration",
            Self::EnumBody => "an enum constant, `;`, or a member declaration",
            Self::ClassBody => "a field, constructor, method, or nested type",
            Self::Block => "a statement",
            Self::ParameterList => "a parameter",
            Self::ArgumentList => "an argument",
            Self::Expression => "an expression (literal, name, or operator)",
        }
    }

    /// Get the recovery tokens appropriate for this context
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::TopLevel => &[
                SyntaxKind::ENUM_KW,
                SyntaxKind::CLASS_KW,
                SyntaxKind::INTERFACE_KW,
                SyntaxKind::IMPORT_KW,
                SyntaxKind::PACKAGE_KW,
                SyntaxKind::PUBLIC_KW,
                SyntaxKind::SEMICOLON,
            ],
            Self::EnumBody | Self::ClassBody => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_BRACE,
                SyntaxKind::PUBLIC_KW,
                SyntaxKind::PROTECTED_KW,
                SyntaxKind::PRIVATE_KW,
                SyntaxKind::STATIC_KW,
                SyntaxKind::ABSTRACT_KW,
                SyntaxKind::ENUM_KW,
                SyntaxKind::CLASS_KW,
                SyntaxKind::INTERFACE_KW,
            ],
            Self::Block => &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
            Self::ParameterList => &[SyntaxKind::R_PAREN, SyntaxKind::COMMA, SyntaxKind::L_BRACE],
            Self::Expression | Self::ArgumentList => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_PAREN,
                SyntaxKind::R_BRACE,
                SyntaxKind::R_BRACKET,
                SyntaxKind::COMMA,
            ],
        }
    }

    /// Check if this context is a type body
    pub fn is_in_body(&self) -> bool {
        matches!(self, Self::EnumBody | Self::ClassBody)
    }
}
