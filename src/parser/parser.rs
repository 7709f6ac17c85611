//! Recursive descent parser for Java
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Trivia is never the first or last token of a composite node: pending
//! trivia is flushed into the enclosing node before a child node starts,
//! so every node's text range begins and ends on a significant token.

use super::ast::{AstNode, SourceFile};
use super::errors::{ErrorCode, ParseContext, SyntaxError};
use super::grammar;
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root of the tree
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.syntax())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse Java source code into a CST
pub fn parse_java(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.report_invalid_tokens();
    grammar::source_file(&mut parser);
    parser.finish()
}

/// How many blocks, bodies and expressions may nest before the parser
/// stops descending and skips the remaining group flat
pub(crate) const MAX_NESTING: usize = 128;

/// The parser state
pub(crate) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    /// Indices of the non-trivia tokens, in order
    significant: Vec<usize>,
    pos: usize,
    /// Number of entries of `significant` already consumed
    next_significant: usize,
    depth: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    contexts: Vec<ParseContext>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(idx, _)| idx)
            .collect();
        Self {
            tokens,
            significant,
            pos: 0,
            next_significant: 0,
            depth: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            contexts: Vec::new(),
        }
    }

    /// Characters the lexer could not classify
    fn report_invalid_tokens(&mut self) {
        let invalid = self.tokens.iter().filter(|t| t.kind == SyntaxKind::ERROR);
        for token in invalid {
            let range = TextRange::at(token.offset, TextSize::of(token.text));
            self.errors.push(SyntaxError::new(
                ErrorCode::E0101,
                format!("invalid character {:?}", token.text),
                range,
            ));
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (trivia is always skipped)
    // =========================================================================

    /// Index of the n-th significant token at or after the cursor
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.significant.get(self.next_significant + n).copied()
    }

    /// Kind of the n-th significant token ahead; `ERROR` past the end
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn current_text(&self) -> &str {
        self.nth_index(0).map(|idx| self.tokens[idx].text).unwrap_or("")
    }

    /// Range of the current significant token, or an empty range at end of input
    pub(crate) fn current_range(&self) -> TextRange {
        match self.nth_index(0) {
            Some(idx) => {
                let token = &self.tokens[idx];
                TextRange::at(token.offset, TextSize::of(token.text))
            }
            None => TextRange::empty(self.end_offset()),
        }
    }

    fn end_offset(&self) -> TextSize {
        self.tokens
            .last()
            .map(|t| t.offset + TextSize::of(t.text))
            .unwrap_or_default()
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current())
    }

    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth_index(n).is_some() && self.nth(n) == kind
    }

    /// Whether a significant token exists n positions ahead
    pub(crate) fn has_nth(&self, n: usize) -> bool {
        self.nth_index(n).is_some()
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.nth_index(0).is_none()
    }

    /// Whether the n-th and (n+1)-th significant tokens touch, as the two
    /// halves of `>>` do
    pub(crate) fn nth_joined(&self, n: usize) -> bool {
        match (self.nth_index(n), self.nth_index(n + 1)) {
            (Some(a), Some(b)) => b == a + 1,
            _ => false,
        }
    }

    /// Cursor position, used by callers to detect lack of progress
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn flush_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume the current significant token (and any trivia before it)
    pub(crate) fn bump(&mut self) {
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
            self.next_significant += 1;
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, code: ErrorCode) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(code, format!("expected {:?}", kind));
            false
        }
    }

    pub(crate) fn expect_semicolon(&mut self) {
        if !self.eat(SyntaxKind::SEMICOLON) {
            let message = format!("expected ';' {}", self.context().description());
            let err = SyntaxError::new(ErrorCode::E0201, message, self.current_range())
                .with_hint("add ';' at the end of the declaration or statement");
            self.errors.push(err);
        }
    }

    /// Consume a closing `}` or report the brace opened at `open` as unclosed
    pub(crate) fn close_brace(&mut self, open: TextRange, what: &str) {
        if self.eat(SyntaxKind::R_BRACE) {
            return;
        }
        let message = format!("unclosed '{{' in {}", what);
        let err = SyntaxError::new(ErrorCode::E0202, message, self.current_range())
            .with_hint(format!("add '}}' to close the {}", what))
            .with_related("opening brace here", open);
        self.errors.push(err);
    }

    /// Consume a closing `)` or report the parenthesis opened at `open`
    pub(crate) fn close_paren(&mut self, open: TextRange) {
        if self.eat(SyntaxKind::R_PAREN) {
            return;
        }
        let err = SyntaxError::from_code(ErrorCode::E0203, self.current_range())
            .with_related("opening parenthesis here", open);
        self.errors.push(err);
    }

    /// Consume a delimited group, nested groups included
    ///
    /// A mismatched closer ends the skip and is left to the enclosing rule.
    pub(crate) fn bump_balanced(&mut self) {
        let Some(close) = self.current().closing_delimiter() else {
            self.bump();
            return;
        };
        self.bump();
        let mut expected = vec![close];
        while let Some(&close) = expected.last() {
            if self.at_eof() {
                return;
            }
            let kind = self.current();
            if kind == close {
                self.bump();
                expected.pop();
            } else if let Some(inner) = kind.closing_delimiter() {
                self.bump();
                expected.push(inner);
            } else if kind.is_closing_delimiter() {
                return;
            } else {
                self.bump();
            }
        }
    }

    // =========================================================================
    // Nesting guard
    // =========================================================================

    /// Enter a nested rule
    ///
    /// Past `MAX_NESTING` nothing is descended into: the group at the cursor
    /// is wrapped flat in an `ERROR` node, `E0206` is reported and false is
    /// returned. Every `true` must be paired with `leave`.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth < MAX_NESTING {
            self.depth += 1;
            return true;
        }
        let range = self.current_range();
        self.errors.push(
            SyntaxError::from_code(ErrorCode::E0206, range)
                .with_hint(format!("more than {} nested levels", MAX_NESTING)),
        );
        if !self.at_eof() {
            self.start_node(SyntaxKind::ERROR);
            self.bump_balanced();
            self.finish_node();
        }
        false
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(crate) fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(code, message, range));
    }

    /// Report an unexpected token in the current context
    pub(crate) fn error_unexpected(&mut self, code: ErrorCode) {
        let found = if self.at_eof() {
            "end of file".to_string()
        } else {
            format!("'{}'", self.current_text())
        };
        let err = SyntaxError::unexpected(&found, self.context(), code, self.current_range());
        self.errors.push(err);
    }

    /// Wrap tokens up to the next recovery point in an `ERROR` node
    ///
    /// Nothing is consumed when already at a recovery token of the current
    /// context or at `}`. Otherwise at least one token is consumed, and
    /// delimited groups are skipped as a whole.
    pub(crate) fn recover(&mut self) {
        let recovery = self.context().recovery_tokens();
        if self.at_eof() || self.at_any(recovery) || self.at(SyntaxKind::R_BRACE) {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        self.bump_balanced();
        while !self.at_eof()
            && !self.at_any(recovery)
            && !self.current().is_closing_delimiter()
        {
            self.bump_balanced();
        }
        self.finish_node();
    }

    /// Wrap the current token alone in an `ERROR` node
    pub(crate) fn bump_error(&mut self) {
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Context stack
    // =========================================================================

    pub(crate) fn context(&self) -> ParseContext {
        self.contexts.last().copied().unwrap_or_default()
    }

    pub(crate) fn push_context(&mut self, context: ParseContext) {
        self.contexts.push(context);
    }

    pub(crate) fn pop_context(&mut self) {
        self.contexts.pop();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start the root node; leading trivia belongs inside it
    pub(crate) fn start_root(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    /// Emit whatever trivia remains at the end of input
    pub(crate) fn flush_remaining(&mut self) {
        self.flush_trivia();
    }
}
