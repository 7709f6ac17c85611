//! File-level normalization with the Java front-end.

use super::config::NormalizerConfig;
use super::error::{Result, UastError};
use super::normalizer::{EnumNormalization, EnumNormalizer};
use crate::frontend::JavaFrontend;
use crate::parser::{SyntaxError, parse_java};

/// Normalization results of one source file
#[derive(Debug, Clone)]
pub struct FileNormalization {
    /// One entry per outermost enum declaration, in source order
    pub declarations: Vec<Result<EnumNormalization>>,
    /// Diagnostics reported while parsing
    pub syntax_errors: Vec<SyntaxError>,
}

impl FileNormalization {
    /// Successfully normalized declarations
    pub fn normalized(&self) -> impl Iterator<Item = &EnumNormalization> {
        self.declarations.iter().filter_map(|r| r.as_ref().ok())
    }

    /// Declarations that were skipped
    pub fn failures(&self) -> impl Iterator<Item = &UastError> {
        self.declarations.iter().filter_map(|r| r.as_ref().err())
    }

    /// Failures that point at a normalizer defect
    pub fn has_defects(&self) -> bool {
        self.failures().any(UastError::is_defect)
    }

    pub fn find(&self, name: &str) -> Option<&EnumNormalization> {
        self.normalized().find(|n| n.name() == Some(name))
    }
}

/// Parse `text` as Java and normalize every enum declaration in it.
///
/// Declarations are independent: a malformed one yields an error entry and
/// leaves its siblings untouched.
pub fn normalize_source(text: &str, config: &NormalizerConfig) -> FileNormalization {
    let parse = parse_java(text);
    let frontend = JavaFrontend;
    let normalizer = EnumNormalizer::new(&frontend, text, *config);
    let declarations = normalizer.normalize_all(&parse.syntax());

    if !parse.errors.is_empty() {
        tracing::debug!(
            "[NORMALIZE] {} syntax errors, {} declarations",
            parse.errors.len(),
            declarations.len()
        );
    }

    FileNormalization {
        declarations,
        syntax_errors: parse.errors,
    }
}
