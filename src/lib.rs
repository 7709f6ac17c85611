//! # uast-normalizer
//!
//! Normalizes enum-like declarations from language-specific concrete syntax
//! trees into a language-agnostic universal AST (UAST).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! batch     → Parallel per-file normalization (rayon)
//!   ↓
//! uast      → Role vocabulary, node kinds, node factory, position mapper,
//!             enum normalizer with override linking
//!   ↓
//! frontend  → Front-end capability trait, Java implementation
//!   ↓
//! parser    → Logos lexer, recursive-descent Java parser, typed AST
//!   ↓
//! base      → Primitives (FileId, LineIndex, TextRange)
//! ```
//!
//! ## Example
//!
//! ```
//! use uast::{NormalizerConfig, normalize_source};
//!
//! let file = normalize_source("enum Season { WINTER, SUMMER }", &NormalizerConfig::default());
//! let season = file.find("Season").unwrap();
//! assert_eq!(season.constants().count(), 2);
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → frontend → uast → batch)
// ============================================================================

/// Foundation types: FileId, LineIndex, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Front-end capabilities consumed by the normalizer
pub mod frontend;

/// Universal AST and the enum normalization engine
pub mod uast;

/// Parallel normalization of many files
pub mod batch;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the normalization surface
pub use batch::normalize_files;
pub use frontend::{FragmentShape, Frontend, JavaFrontend};
pub use uast::{
    EnumNormalization, EnumNormalizer, FileNormalization, MemberKey, NodeKind, NodePath,
    NormalizerConfig, Observation, OverrideLink, Role, RoleSet, UastError, UastNode,
    normalize_source,
};
