//! Universal AST and the enum normalization engine.
//!
//! ```text
//! normalizer  -> Phase machine, override linking, recursive lowering
//!   ↓
//! factory     -> NodeFactory: kind + roles + token + span per node
//!   ↓
//! span        -> PositionMapper: byte/line/column spans, containment
//!   ↓
//! role, kind  -> Role vocabulary (process-wide, read-only), NodeKind
//! ```
//!
//! Nodes are immutable once built and own their children exclusively.
//! Override links refer to nodes through [`NodePath`]s, so a finished tree
//! never contains a cycle.

mod config;
mod error;
mod factory;
mod file;
mod kind;
mod node;
mod normalizer;
mod role;
mod span;

pub use config::NormalizerConfig;
pub use error::{Result, SpanViolationKind, UastError};
pub use factory::NodeFactory;
pub use file::{FileNormalization, normalize_source};
pub use kind::NodeKind;
pub use node::{NodePath, SourceSpan, UastNode};
pub use normalizer::{
    EnumNormalization, EnumNormalizer, MemberKey, Observation, OverrideLink, Phase,
};
pub use role::{Role, RoleSet, Vocabulary};
pub use span::PositionMapper;
