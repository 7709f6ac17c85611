//! Expression grammar
//!
//! Binary operators are parsed by precedence climbing:
//!
//! ```text
//! Assignment  → Conditional (AssignOp Assignment)?
//! Conditional → Binary(1) ('?' Expression ':' Expression)?
//! Binary(n)   → Unary (op[prec >= n] Binary(prec + 1))*
//! Unary       → ('!' | '~' | '-' | '+' | '++' | '--') Unary | Cast | Postfix
//! Postfix     → Primary ('.' NameRef | ArgList | '[' Expression ']' | '++' | '--' | '::' NameRef)*
//! ```
//!
//! The lexer never joins `>` tokens, so `>>`, `>>>`, `>>=` and `>>>=` are
//! recognised here from adjacent `>`/`>=` tokens.

use super::items::{class_body, type_ref};
use super::statements::block;
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Tokens that can start an expression
const EXPR_START: &[SyntaxKind] = &[
    SyntaxKind::IDENT,
    SyntaxKind::INT_NUMBER,
    SyntaxKind::FLOAT_NUMBER,
    SyntaxKind::STRING,
    SyntaxKind::CHAR,
    SyntaxKind::TRUE_KW,
    SyntaxKind::FALSE_KW,
    SyntaxKind::NULL_KW,
    SyntaxKind::THIS_KW,
    SyntaxKind::SUPER_KW,
    SyntaxKind::NEW_KW,
    SyntaxKind::L_PAREN,
    SyntaxKind::BANG,
    SyntaxKind::TILDE,
    SyntaxKind::MINUS,
    SyntaxKind::PLUS,
    SyntaxKind::PLUS_PLUS,
    SyntaxKind::MINUS_MINUS,
];

const PREFIX_OPS: &[SyntaxKind] = &[
    SyntaxKind::BANG,
    SyntaxKind::TILDE,
    SyntaxKind::MINUS,
    SyntaxKind::PLUS,
    SyntaxKind::PLUS_PLUS,
    SyntaxKind::MINUS_MINUS,
];

pub(crate) fn at_expr_start(p: &Parser) -> bool {
    p.at_any(EXPR_START) || (!p.at_eof() && p.current().is_primitive_type())
}

const SHIFT_PRECEDENCE: u8 = 8;

/// Binding power of a binary operator
fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    let prec = match kind {
        SyntaxKind::PIPE_PIPE => 1,
        SyntaxKind::AMP_AMP => 2,
        SyntaxKind::PIPE => 3,
        SyntaxKind::CARET => 4,
        SyntaxKind::AMP => 5,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 6,
        SyntaxKind::LT
        | SyntaxKind::GT
        | SyntaxKind::LT_EQ
        | SyntaxKind::GT_EQ
        | SyntaxKind::INSTANCEOF_KW => 7,
        SyntaxKind::LT_LT => SHIFT_PRECEDENCE,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
        _ => return None,
    };
    Some(prec)
}

/// `>>`, `>>>`, `>>=` or `>>>=` at the cursor: token count and whether it assigns
fn right_shift_at(p: &Parser) -> Option<(usize, bool)> {
    if !p.at(SyntaxKind::GT) || !p.nth_joined(0) {
        return None;
    }
    match p.nth(1) {
        SyntaxKind::GT_EQ => Some((2, true)),
        SyntaxKind::GT if p.nth_joined(1) && p.nth_at(2, SyntaxKind::GT_EQ) => Some((3, true)),
        SyntaxKind::GT if p.nth_joined(1) && p.nth_at(2, SyntaxKind::GT) => Some((3, false)),
        SyntaxKind::GT => Some((2, false)),
        _ => None,
    }
}

/// Parse an expression, returning false when none could start here
pub(crate) fn expression(p: &mut Parser) -> bool {
    if !at_expr_start(p) {
        p.push_context(ParseContext::Expression);
        p.error_unexpected(ErrorCode::E0401);
        p.pop_context();
        return false;
    }
    if p.enter() {
        assignment(p);
        p.leave();
    }
    true
}

fn assignment(p: &mut Parser) {
    let cp = p.checkpoint();
    conditional(p);
    let width = match right_shift_at(p) {
        Some((width, true)) => width,
        _ if !p.at_eof() && p.current().is_assignment_op() => 1,
        _ => return,
    };
    p.start_node_at(cp, SyntaxKind::ASSIGN_EXPR);
    for _ in 0..width {
        p.bump();
    }
    expression(p);
    p.finish_node();
}

fn conditional(p: &mut Parser) {
    let cp = p.checkpoint();
    binary(p, 1);
    if p.at(SyntaxKind::QUESTION) {
        p.start_node_at(cp, SyntaxKind::COND_EXPR);
        p.bump();
        expression(p);
        if p.expect(SyntaxKind::COLON, ErrorCode::E0401) {
            expression(p);
        }
        p.finish_node();
    }
}

fn binary(p: &mut Parser, min_prec: u8) {
    let cp = p.checkpoint();
    if !unary(p) {
        return;
    }
    while !p.at_eof() {
        let (prec, width) = match right_shift_at(p) {
            Some((_, true)) => break,
            Some((width, false)) => (SHIFT_PRECEDENCE, width),
            None => match binary_precedence(p.current()) {
                Some(prec) => (prec, 1),
                None => break,
            },
        };
        if prec < min_prec {
            break;
        }
        p.start_node_at(cp, SyntaxKind::BIN_EXPR);
        if p.at(SyntaxKind::INSTANCEOF_KW) {
            p.bump();
            type_ref(p);
        } else {
            for _ in 0..width {
                p.bump();
            }
            if at_expr_start(p) {
                binary(p, prec + 1);
            } else {
                expression(p);
            }
        }
        p.finish_node();
    }
}

fn unary(p: &mut Parser) -> bool {
    if !p.enter() {
        return true;
    }
    let parsed = prefix_or_cast(p);
    p.leave();
    parsed
}

fn prefix_or_cast(p: &mut Parser) -> bool {
    if p.at_any(PREFIX_OPS) {
        p.start_node(SyntaxKind::PREFIX_EXPR);
        p.bump();
        if at_expr_start(p) {
            unary(p);
        } else {
            expression(p);
        }
        p.finish_node();
        return true;
    }
    if p.at(SyntaxKind::L_PAREN) && looks_like_cast(p) {
        p.start_node(SyntaxKind::CAST_EXPR);
        let open = p.current_range();
        p.bump();
        type_ref(p);
        p.close_paren(open);
        unary(p);
        p.finish_node();
        return true;
    }
    postfix(p)
}

fn postfix(p: &mut Parser) -> bool {
    let cp = p.checkpoint();
    if !primary(p) {
        return false;
    }
    loop {
        match p.current() {
            SyntaxKind::DOT => {
                p.start_node_at(cp, SyntaxKind::FIELD_EXPR);
                p.bump();
                match p.current() {
                    SyntaxKind::IDENT | SyntaxKind::CLASS_KW | SyntaxKind::THIS_KW | SyntaxKind::NEW_KW => {
                        name_ref(p)
                    }
                    _ => p.error(ErrorCode::E0301, "expected member name after '.'"),
                }
                p.finish_node();
            }
            SyntaxKind::L_PAREN => {
                p.start_node_at(cp, SyntaxKind::CALL_EXPR);
                arg_list(p);
                p.finish_node();
            }
            SyntaxKind::L_BRACKET => {
                p.start_node_at(cp, SyntaxKind::INDEX_EXPR);
                p.bump();
                expression(p);
                if !p.eat(SyntaxKind::R_BRACKET) {
                    p.error(ErrorCode::E0203, "unclosed '['");
                }
                p.finish_node();
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                p.start_node_at(cp, SyntaxKind::POSTFIX_EXPR);
                p.bump();
                p.finish_node();
            }
            SyntaxKind::COLON_COLON => {
                p.start_node_at(cp, SyntaxKind::METHOD_REF);
                p.bump();
                if p.at_any(&[SyntaxKind::IDENT, SyntaxKind::NEW_KW]) {
                    name_ref(p);
                } else {
                    p.error(ErrorCode::E0301, "expected method name after '::'");
                }
                p.finish_node();
            }
            _ => break,
        }
    }
    true
}

fn name_ref(p: &mut Parser) {
    p.start_node(SyntaxKind::NAME_REF);
    p.bump();
    p.finish_node();
}

fn primary(p: &mut Parser) -> bool {
    match p.current() {
        kind if kind.is_literal() => {
            p.start_node(SyntaxKind::LITERAL);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::THIS_KW => {
            p.start_node(SyntaxKind::THIS_EXPR);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::IDENT if p.nth_at(1, SyntaxKind::ARROW) => lambda(p),
        SyntaxKind::IDENT | SyntaxKind::SUPER_KW => name_ref(p),
        kind if kind.is_primitive_type() => name_ref(p),
        SyntaxKind::L_PAREN if paren_followed_by_arrow(p) => lambda(p),
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PAREN_EXPR);
            let open = p.current_range();
            p.bump();
            expression(p);
            p.close_paren(open);
            p.finish_node();
        }
        SyntaxKind::NEW_KW => new_expr(p),
        _ => {
            p.push_context(ParseContext::Expression);
            p.error_unexpected(ErrorCode::E0401);
            p.pop_context();
            return false;
        }
    }
    true
}

/// NewExpr = 'new' TypeRef (ArgList ClassBody? | ('[' Expression? ']')* ArrayInit?)
fn new_expr(p: &mut Parser) {
    p.start_node(SyntaxKind::NEW_EXPR);
    p.bump(); // new
    type_ref(p);
    if p.at(SyntaxKind::L_PAREN) {
        arg_list(p);
        if p.at(SyntaxKind::L_BRACE) {
            class_body(p);
        }
    } else {
        while p.at(SyntaxKind::L_BRACKET) {
            p.bump_balanced();
        }
        if p.at(SyntaxKind::L_BRACE) {
            array_init(p);
        }
    }
    p.finish_node();
}

/// Lambda = (IDENT | '(' ... ')') '->' (Block | Expression)
fn lambda(p: &mut Parser) {
    p.start_node(SyntaxKind::LAMBDA_EXPR);
    p.bump_balanced();
    p.expect(SyntaxKind::ARROW, ErrorCode::E0401);
    if p.at(SyntaxKind::L_BRACE) {
        block(p);
    } else {
        expression(p);
    }
    p.finish_node();
}

/// ArrayInit = '{' ... '}' (kept flat)
pub(crate) fn array_init(p: &mut Parser) {
    p.start_node(SyntaxKind::ARRAY_INIT);
    p.bump_balanced();
    p.finish_node();
}

/// ArgList = '(' (Expression (',' Expression)*)? ')'
pub(crate) fn arg_list(p: &mut Parser) {
    p.start_node(SyntaxKind::ARG_LIST);
    let open = p.current_range();
    p.bump(); // (
    p.push_context(ParseContext::ArgumentList);
    if !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        loop {
            if at_expr_start(p) {
                expression(p);
            } else {
                p.error_unexpected(ErrorCode::E0402);
                p.recover();
            }
            if p.eat(SyntaxKind::COMMA) {
                continue;
            }
            if p.at_eof() || p.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
                break;
            }
            p.error_unexpected(ErrorCode::E0402);
            p.recover();
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.pop_context();
    p.close_paren(open);
    p.finish_node();
}

/// Whether the `(` at the cursor closes into `->`
fn paren_followed_by_arrow(p: &Parser) -> bool {
    matching_paren_ahead(p, 0).is_some_and(|after| p.nth_at(after, SyntaxKind::ARROW))
}

/// Index just past the `)` matching the `(` at `n`
fn matching_paren_ahead(p: &Parser, mut n: usize) -> Option<usize> {
    let mut depth = 0usize;
    while p.has_nth(n) {
        match p.nth(n) {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return Some(n + 1);
                }
            }
            SyntaxKind::SEMICOLON | SyntaxKind::L_BRACE | SyntaxKind::R_BRACE => return None,
            _ => {}
        }
        n += 1;
    }
    None
}

/// `(int) x`, `(String) o`, `(a.B) c`: a parenthesised type followed by an operand
fn looks_like_cast(p: &Parser) -> bool {
    let first = p.nth(1);
    if !p.has_nth(1) {
        return false;
    }
    let mut n = 2;
    if first.is_primitive_type() {
        while p.nth_at(n, SyntaxKind::L_BRACKET) && p.nth_at(n + 1, SyntaxKind::R_BRACKET) {
            n += 2;
        }
        return p.nth_at(n, SyntaxKind::R_PAREN);
    }
    if first != SyntaxKind::IDENT {
        return false;
    }
    while p.nth_at(n, SyntaxKind::DOT) && p.nth_at(n + 1, SyntaxKind::IDENT) {
        n += 2;
    }
    while p.nth_at(n, SyntaxKind::L_BRACKET) && p.nth_at(n + 1, SyntaxKind::R_BRACKET) {
        n += 2;
    }
    if !p.nth_at(n, SyntaxKind::R_PAREN) || !p.has_nth(n + 1) {
        return false;
    }
    let next = p.nth(n + 1);
    next == SyntaxKind::IDENT
        || next.is_literal()
        || matches!(
            next,
            SyntaxKind::THIS_KW
                | SyntaxKind::NEW_KW
                | SyntaxKind::L_PAREN
                | SyntaxKind::BANG
                | SyntaxKind::TILDE
        )
}
