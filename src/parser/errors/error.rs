//! Syntax errors produced by the Java parser

use rowan::TextRange;

use super::codes::ErrorCode;
use super::context::ParseContext;

/// A secondary location attached to an error, e.g. the `{` that was never closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub message: String,
    pub range: TextRange,
}

/// A recoverable parse error. The tree is always built regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub code: ErrorCode,
    pub message: String,
    pub range: TextRange,
    /// Suggested fix
    pub hint: Option<String>,
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    pub fn new(code: ErrorCode, message: impl Into<String>, range: TextRange) -> Self {
        Self {
            code,
            message: message.into(),
            range,
            hint: None,
            related: Vec::new(),
        }
    }

    /// Error carrying the code's default message
    pub fn from_code(code: ErrorCode, range: TextRange) -> Self {
        Self::new(code, code.default_message(), range)
    }

    /// "unexpected X in <context>, expected Y"
    pub fn unexpected(found: &str, context: ParseContext, code: ErrorCode, range: TextRange) -> Self {
        let message = format!(
            "unexpected {} {}, expected {}",
            found,
            context.description(),
            context.expected_description()
        );
        Self::new(code, message, range)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo {
            message: message.into(),
            range,
        });
        self
    }

    pub fn has_related(&self) -> bool {
        !self.related.is_empty()
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {:?}", self.code, self.message, self.range)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
