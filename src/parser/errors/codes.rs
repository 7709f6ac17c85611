//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, semicolons)
//! - E03xx: Declaration errors (types, members)
//! - E04xx: Expression errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,

    // =========================================================================
    // E02xx: Structural errors (braces, semicolons, delimiters)
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unexpected closing delimiter
    E0205,
    /// Nesting too deep to parse
    E0206,

    // =========================================================================
    // E03xx: Declaration errors (types, members)
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Missing type
    E0302,
    /// Unexpected token in a type body
    E0303,
    /// Missing body (neither `;` nor `{`)
    E0304,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Missing expression where expected
    E0401,
    /// Invalid argument in a call or constant argument list
    E0402,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0901 => "E0901",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0205 | Self::E0206 => {
                "structural error"
            }
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 => "declaration error",
            Self::E0401 | Self::E0402 => "expression error",
            Self::E0901 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0206 => "nesting too deep",
            Self::E0301 => "missing identifier",
            Self::E0302 => "missing type",
            Self::E0303 => "unexpected token in type body",
            Self::E0304 => "missing body",
            Self::E0401 => "expected expression",
            Self::E0402 => "invalid argument",
            Self::E0901 => "unexpected token",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0205 | Self::E0206
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
