//! Error types for normalization.

use text_size::TextRange;
use thiserror::Error;

use super::kind::NodeKind;

/// How a child span breaks the containment rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SpanViolationKind {
    /// The child reaches outside its parent
    Escapes,
    /// The child overlaps its previous sibling
    Overlaps,
    /// The child starts before its previous sibling
    OutOfOrder,
}

impl std::fmt::Display for SpanViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Escapes => "escapes its parent",
            Self::Overlaps => "overlaps its previous sibling",
            Self::OutOfOrder => "starts before its previous sibling",
        })
    }
}

/// Errors that can occur while normalizing one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UastError {
    /// The CST fragment does not have the shape the requested kind needs.
    /// Recoverable: the caller skips the declaration.
    #[error("malformed {kind} at {range:?}: {reason}")]
    MalformedFragment {
        kind: NodeKind,
        range: TextRange,
        reason: String,
    },

    /// A built node broke span containment. Always a defect.
    #[error("span violation: {child_kind} {child:?} {violation} {parent_kind} {parent:?}")]
    SpanViolation {
        parent_kind: NodeKind,
        parent: TextRange,
        child_kind: NodeKind,
        child: TextRange,
        violation: SpanViolationKind,
    },
}

impl UastError {
    /// Create a malformed fragment error.
    pub fn malformed(kind: NodeKind, range: TextRange, reason: impl Into<String>) -> Self {
        Self::MalformedFragment {
            kind,
            range,
            reason: reason.into(),
        }
    }

    /// Internal consistency failures that must be fixed, never tolerated
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::SpanViolation { .. })
    }

    /// Source range the error points at
    pub fn range(&self) -> TextRange {
        match self {
            Self::MalformedFragment { range, .. } => *range,
            Self::SpanViolation { child, .. } => *child,
        }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, UastError>;
