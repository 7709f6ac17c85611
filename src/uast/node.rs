//! The universal AST node.

use smol_str::SmolStr;
use text_size::TextRange;

use super::kind::NodeKind;
use super::role::{Role, RoleSet};
use crate::base::LineCol;

/// Exact source extent of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceSpan {
    pub range: TextRange,
    pub start: LineCol,
    pub end: LineCol,
}

impl SourceSpan {
    pub fn contains(&self, other: &SourceSpan) -> bool {
        self.range.contains_range(other.range)
    }
}

impl std::fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Child-index path from a root node. Used as a lookup key instead of a
/// structural edge, so cross references never create cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodePath(Vec<u32>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index as u32);
        Self(path)
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl From<Vec<u32>> for NodePath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<_> = self.0.iter().map(u32::to_string).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// One node of the universal AST. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UastNode {
    kind: NodeKind,
    roles: RoleSet,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    token: Option<SmolStr>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    children: Vec<UastNode>,
    span: SourceSpan,
}

impl UastNode {
    pub(crate) fn new(
        kind: NodeKind,
        roles: RoleSet,
        token: Option<SmolStr>,
        children: Vec<UastNode>,
        span: SourceSpan,
    ) -> Self {
        Self {
            kind,
            roles,
            token,
            children,
            span,
        }
    }

    pub(crate) fn add_role(&mut self, role: Role) {
        self.roles.insert(role);
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn roles(&self) -> RoleSet {
        self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn children(&self) -> &[UastNode] {
        &self.children
    }

    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    pub fn range(&self) -> TextRange {
        self.span.range
    }

    /// Token of the first `Identifier` child
    pub fn name(&self) -> Option<&str> {
        self.children
            .iter()
            .find(|c| *c.kind() == NodeKind::Identifier)
            .and_then(|c| c.token())
    }

    /// Children whose kind matches `pred`, in order
    pub fn children_of<'a>(
        &'a self,
        pred: impl Fn(&NodeKind) -> bool + 'a,
    ) -> impl Iterator<Item = &'a UastNode> + 'a {
        self.children.iter().filter(move |c| pred(c.kind()))
    }

    /// Depth-first pre-order traversal, self included
    pub fn descendants(&self) -> impl Iterator<Item = &UastNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Follow a child-index path from this node
    pub fn resolve(&self, path: &NodePath) -> Option<&UastNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children.get(index as usize))
    }

    /// Source slice covered by the span
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(std::ops::Range::<usize>::from(self.span.range))
    }

    pub fn node_count(&self) -> usize {
        self.descendants().count()
    }

    /// Indented dump, one line per node
    pub fn log_string(&self) -> String {
        let mut out = String::new();
        self.write_log(&mut out, 0);
        out
    }

    fn write_log(&self, out: &mut String, depth: usize) {
        use std::fmt::Write;

        let _ = write!(out, "{}{}", "  ".repeat(depth), self.kind);
        if let Some(token) = &self.token {
            let _ = write!(out, " ({token})");
        }
        let _ = writeln!(out, " [{}] @{}", self.roles, self.span);
        for child in &self.children {
            child.write_log(out, depth + 1);
        }
    }
}
