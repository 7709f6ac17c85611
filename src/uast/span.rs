//! Position mapping and span containment checks.

use text_size::{TextRange, TextSize};

use super::error::{Result, SpanViolationKind, UastError};
use super::kind::NodeKind;
use super::node::{SourceSpan, UastNode};
use crate::base::LineIndex;

/// Maps source ranges of one text to spans and enforces containment.
#[derive(Debug, Clone)]
pub struct PositionMapper<'s> {
    source: &'s str,
    line_index: LineIndex,
}

impl<'s> PositionMapper<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            line_index: LineIndex::new(source),
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Span for `range`, which must lie inside the text on char boundaries
    pub fn span(&self, kind: &NodeKind, range: TextRange) -> Result<SourceSpan> {
        self.text(kind, range)?;
        let (Some(start), Some(end)) = (
            self.line_index.line_col(range.start()),
            self.line_index.line_col(range.end()),
        ) else {
            return Err(UastError::malformed(kind.clone(), range, "range outside source"));
        };
        Ok(SourceSpan { range, start, end })
    }

    /// Source slice for `range`
    pub fn text(&self, kind: &NodeKind, range: TextRange) -> Result<&'s str> {
        if range.end() > TextSize::of(self.source) {
            return Err(UastError::malformed(kind.clone(), range, "range outside source"));
        }
        self.source
            .get(std::ops::Range::<usize>::from(range))
            .ok_or_else(|| UastError::malformed(kind.clone(), range, "range splits a character"))
    }

    /// Check that `children` lie inside `parent` and follow each other
    /// without overlap
    pub fn check_children(
        &self,
        parent_kind: &NodeKind,
        parent: TextRange,
        children: &[UastNode],
    ) -> Result<()> {
        let mut previous: Option<TextRange> = None;
        for child in children {
            let range = child.range();
            let violation = if !parent.contains_range(range) {
                Some(SpanViolationKind::Escapes)
            } else {
                match previous {
                    Some(prev) if range.start() < prev.start() => Some(SpanViolationKind::OutOfOrder),
                    Some(prev) if range.start() < prev.end() => Some(SpanViolationKind::Overlaps),
                    _ => None,
                }
            };
            if let Some(violation) = violation {
                tracing::error!(
                    "[SPAN] {} {:?} {} {} {:?}",
                    child.kind(),
                    range,
                    violation,
                    parent_kind,
                    parent
                );
                return Err(UastError::SpanViolation {
                    parent_kind: parent_kind.clone(),
                    parent,
                    child_kind: child.kind().clone(),
                    child: range,
                    violation,
                });
            }
            previous = Some(range);
        }
        Ok(())
    }

    /// Re-check containment and line/column agreement for a whole subtree
    pub fn verify_tree(&self, root: &UastNode) -> Result<()> {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let expected = self.span(node.kind(), node.range())?;
            if expected != *node.span() {
                return Err(UastError::malformed(
                    node.kind().clone(),
                    node.range(),
                    "line/column span disagrees with byte range",
                ));
            }
            self.check_children(node.kind(), node.range(), node.children())?;
            stack.extend(node.children());
        }
        Ok(())
    }
}
