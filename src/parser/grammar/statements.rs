//! Statement grammar
//!
//! Only statements that carry structure worth normalizing get dedicated
//! nodes. Loops, `switch`, `try` and friends are consumed as balanced
//! `OPAQUE_STMT` nodes.

use super::expressions::{at_expr_start, expression};
use super::items::{modifiers, type_decl_at, type_ref, var_declarators};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;
use rowan::Checkpoint;

/// Block = '{' Statement* '}'
pub(crate) fn block(p: &mut Parser) {
    p.start_node(SyntaxKind::BLOCK);
    let open = p.current_range();
    p.bump(); // {
    p.push_context(ParseContext::Block);
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        let before = p.position();
        statement(p);
        if p.position() == before {
            p.error_unexpected(ErrorCode::E0401);
            p.bump_error();
        }
    }
    p.pop_context();
    p.close_brace(open, "block");
    p.finish_node();
}

fn statement(p: &mut Parser) {
    if !p.enter() {
        return;
    }
    nested_statement(p);
    p.leave();
}

fn nested_statement(p: &mut Parser) {
    match p.current() {
        SyntaxKind::L_BRACE => block(p),
        SyntaxKind::SEMICOLON => {
            p.start_node(SyntaxKind::EMPTY_STMT);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::RETURN_KW => return_stmt(p),
        SyntaxKind::IF_KW => if_stmt(p),
        SyntaxKind::ENUM_KW | SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW => {
            let cp = p.checkpoint();
            type_decl_at(p, cp);
        }
        SyntaxKind::FINAL_KW | SyntaxKind::ABSTRACT_KW | SyntaxKind::STATIC_KW | SyntaxKind::AT => {
            let cp = p.checkpoint();
            modifiers(p);
            if p.at_any(&[SyntaxKind::ENUM_KW, SyntaxKind::CLASS_KW, SyntaxKind::INTERFACE_KW]) {
                type_decl_at(p, cp);
            } else {
                local_var_stmt(p, cp);
            }
        }
        kind if kind.is_opaque_statement_keyword() && !p.at_eof() => opaque_stmt(p),
        _ if looks_like_local_var(p) => {
            let cp = p.checkpoint();
            local_var_stmt(p, cp);
        }
        _ => expr_stmt(p),
    }
}

fn return_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::RETURN_STMT);
    p.bump(); // return
    if !p.at(SyntaxKind::SEMICOLON) && !p.at(SyntaxKind::R_BRACE) && !p.at_eof() {
        expression(p);
    }
    p.expect_semicolon();
    p.finish_node();
}

/// IfStmt = 'if' '(' Expression ')' Statement ElseBranch?
fn if_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::IF_STMT);
    p.bump(); // if
    if p.at(SyntaxKind::L_PAREN) {
        let open = p.current_range();
        p.bump();
        expression(p);
        p.close_paren(open);
    } else {
        p.error(ErrorCode::E0401, "expected '(' after 'if'");
    }
    statement(p);
    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_BRANCH);
        p.bump();
        statement(p);
        p.finish_node();
    }
    p.finish_node();
}

/// LocalVarStmt = Modifiers? TypeRef VarDeclarator (',' VarDeclarator)* ';'
fn local_var_stmt(p: &mut Parser, cp: Checkpoint) {
    p.start_node_at(cp, SyntaxKind::LOCAL_VAR_STMT);
    type_ref(p);
    var_declarators(p, "variable");
    p.expect_semicolon();
    p.finish_node();
}

fn expr_stmt(p: &mut Parser) {
    if !at_expr_start(p) {
        p.error_unexpected(ErrorCode::E0401);
        p.recover();
        return;
    }
    p.start_node(SyntaxKind::EXPR_STMT);
    expression(p);
    p.expect_semicolon();
    p.finish_node();
}

/// Consume a statement without interpreting it
///
/// Ends after a `;` at depth zero, or after a braced group unless the
/// statement continues with `else`, `catch`, `finally` (or the `while`
/// of a `do` loop).
fn opaque_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::OPAQUE_STMT);
    let is_do = p.at(SyntaxKind::DO_KW);
    p.bump();
    while !p.at_eof() {
        match p.current() {
            SyntaxKind::SEMICOLON => {
                p.bump();
                break;
            }
            SyntaxKind::L_BRACE => {
                p.bump_balanced();
                let continues = p.at_any(&[
                    SyntaxKind::ELSE_KW,
                    SyntaxKind::CATCH_KW,
                    SyntaxKind::FINALLY_KW,
                ]) || (is_do && p.at(SyntaxKind::WHILE_KW));
                if !continues {
                    break;
                }
            }
            SyntaxKind::R_BRACE | SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => break,
            _ => p.bump_balanced(),
        }
    }
    p.finish_node();
}

/// Whether the upcoming tokens read as `Type name (= | ; | , | [ | :)`
fn looks_like_local_var(p: &Parser) -> bool {
    let first = p.current();
    if p.at_eof() || !(first == SyntaxKind::IDENT || first.is_primitive_type()) {
        return false;
    }
    let mut n = 1;
    if p.nth_at(n, SyntaxKind::LT) {
        match skip_type_args_ahead(p, n) {
            Some(next) => n = next,
            None => return false,
        }
    }
    while p.nth_at(n, SyntaxKind::DOT) && p.nth_at(n + 1, SyntaxKind::IDENT) {
        n += 2;
        if p.nth_at(n, SyntaxKind::LT) {
            match skip_type_args_ahead(p, n) {
                Some(next) => n = next,
                None => return false,
            }
        }
    }
    while p.nth_at(n, SyntaxKind::L_BRACKET) && p.nth_at(n + 1, SyntaxKind::R_BRACKET) {
        n += 2;
    }
    p.nth_at(n, SyntaxKind::IDENT)
        && p.has_nth(n + 1)
        && matches!(
            p.nth(n + 1),
            SyntaxKind::EQ
                | SyntaxKind::SEMICOLON
                | SyntaxKind::COMMA
                | SyntaxKind::L_BRACKET
                | SyntaxKind::COLON
        )
}

/// Index just past a `<...>` group at `n`, if it only holds type tokens
fn skip_type_args_ahead(p: &Parser, mut n: usize) -> Option<usize> {
    let mut depth = 0usize;
    while p.has_nth(n) {
        let kind = p.nth(n);
        match kind {
            SyntaxKind::LT => depth += 1,
            SyntaxKind::GT => {
                depth -= 1;
                if depth == 0 {
                    return Some(n + 1);
                }
            }
            SyntaxKind::IDENT
            | SyntaxKind::DOT
            | SyntaxKind::COMMA
            | SyntaxKind::QUESTION
            | SyntaxKind::EXTENDS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::AMP
            | SyntaxKind::L_BRACKET
            | SyntaxKind::R_BRACKET => {}
            _ if kind.is_primitive_type() => {}
            _ => return None,
        }
        n += 1;
    }
    None
}
