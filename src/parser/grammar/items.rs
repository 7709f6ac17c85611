//! Declaration-level grammar
//!
//! ```text
//! SourceFile   = (PackageDecl | ImportDecl | TypeDecl | ';')*
//! TypeDecl     = Modifiers? (EnumDecl | ClassDecl | InterfaceDecl)
//! EnumDecl     = 'enum' Name SuperTypes? EnumBody
//! EnumBody     = '{' (EnumConstant (',' EnumConstant)*)? ','? (';' Member*)? '}'
//! EnumConstant = Modifiers? Name ArgList? ClassBody?
//! ClassBody    = '{' Member* '}'
//! Member       = ';' | Initializer | TypeDecl | ConstructorDecl | MethodDecl | FieldDecl
//! ```

use super::expressions::{arg_list, array_init, expression};
use super::statements::block;
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;
use rowan::Checkpoint;

/// Tokens that may legally follow the name of an enum constant
const CONSTANT_FOLLOW: &[SyntaxKind] = &[
    SyntaxKind::L_PAREN,
    SyntaxKind::L_BRACE,
    SyntaxKind::COMMA,
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_BRACE,
    SyntaxKind::ERROR,
];

/// Keywords that introduce a type declaration
const TYPE_DECL_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::ENUM_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::INTERFACE_KW,
];

pub(crate) fn source_file(p: &mut Parser) {
    p.start_root(SyntaxKind::SOURCE_FILE);

    while !p.at_eof() {
        match p.current() {
            SyntaxKind::PACKAGE_KW => package_decl(p),
            SyntaxKind::IMPORT_KW => import_decl(p),
            SyntaxKind::SEMICOLON => p.bump(),
            SyntaxKind::R_BRACE => {
                p.error(ErrorCode::E0205, "unexpected closing brace");
                p.bump_error();
            }
            _ if at_type_decl_start(p) => {
                let cp = p.checkpoint();
                type_decl_at(p, cp);
            }
            _ => {
                p.error_unexpected(ErrorCode::E0901);
                p.recover();
            }
        }
    }

    p.flush_remaining();
    p.finish_node();
}

fn package_decl(p: &mut Parser) {
    p.start_node(SyntaxKind::PACKAGE_DECL);
    p.bump(); // package
    if p.at(SyntaxKind::IDENT) {
        qualified_name(p);
    } else {
        p.error(ErrorCode::E0301, "expected package name");
    }
    p.expect_semicolon();
    p.finish_node();
}

fn import_decl(p: &mut Parser) {
    p.start_node(SyntaxKind::IMPORT_DECL);
    p.bump(); // import
    p.eat(SyntaxKind::STATIC_KW);
    if p.at(SyntaxKind::IDENT) {
        qualified_name(p);
        if p.at(SyntaxKind::DOT) && p.nth_at(1, SyntaxKind::STAR) {
            p.bump();
            p.bump();
        }
    } else {
        p.error(ErrorCode::E0301, "expected import path");
    }
    p.expect_semicolon();
    p.finish_node();
}

/// QualifiedName = IDENT ('.' IDENT)*
fn qualified_name(p: &mut Parser) {
    p.start_node(SyntaxKind::QUALIFIED_NAME);
    p.bump();
    while p.at(SyntaxKind::DOT) && p.nth_at(1, SyntaxKind::IDENT) {
        p.bump();
        p.bump();
    }
    p.finish_node();
}

/// Parse a `NAME` node, reporting `E0301` when the identifier is missing
pub(super) fn name(p: &mut Parser, what: &str) -> bool {
    if p.at(SyntaxKind::IDENT) {
        p.start_node(SyntaxKind::NAME);
        p.bump();
        p.finish_node();
        true
    } else {
        p.error(ErrorCode::E0301, format!("expected {} name", what));
        false
    }
}

fn at_annotation(p: &Parser) -> bool {
    p.at(SyntaxKind::AT) && !p.nth_at(1, SyntaxKind::INTERFACE_KW)
}

fn at_modifier(p: &Parser) -> bool {
    (!p.at_eof() && p.current().is_modifier()) || at_annotation(p)
}

fn at_type_decl_start(p: &Parser) -> bool {
    at_modifier(p)
        || p.at_any(TYPE_DECL_KEYWORDS)
        || (p.at(SyntaxKind::AT) && p.nth_at(1, SyntaxKind::INTERFACE_KW))
}

/// Modifiers = (modifier keyword | Annotation)+
///
/// Returns whether anything was consumed; no node is built otherwise.
pub(super) fn modifiers(p: &mut Parser) -> bool {
    if !at_modifier(p) {
        return false;
    }
    p.start_node(SyntaxKind::MODIFIERS);
    while at_modifier(p) {
        if p.at(SyntaxKind::AT) {
            annotation(p);
        } else {
            p.bump();
        }
    }
    p.finish_node();
    true
}

/// Annotation = '@' QualifiedName ('(' ... ')')?
fn annotation(p: &mut Parser) {
    p.start_node(SyntaxKind::ANNOTATION);
    p.bump(); // @
    if p.at(SyntaxKind::IDENT) {
        qualified_name(p);
    } else {
        p.error(ErrorCode::E0301, "expected annotation name");
    }
    if p.at(SyntaxKind::L_PAREN) {
        p.bump_balanced();
    }
    p.finish_node();
}

/// Parse a type declaration whose modifiers start at `cp`
pub(super) fn type_decl_at(p: &mut Parser, cp: Checkpoint) {
    let had_modifiers = modifiers(p);
    match p.current() {
        SyntaxKind::ENUM_KW => enum_decl(p, cp),
        SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW => class_decl(p, cp),
        SyntaxKind::AT if p.nth_at(1, SyntaxKind::INTERFACE_KW) => class_decl(p, cp),
        _ => {
            p.error_unexpected(ErrorCode::E0901);
            if had_modifiers {
                p.start_node_at(cp, SyntaxKind::ERROR);
                p.finish_node();
            }
            p.recover();
        }
    }
}

fn enum_decl(p: &mut Parser, cp: Checkpoint) {
    p.start_node_at(cp, SyntaxKind::ENUM_DECL);
    p.bump(); // enum
    name(p, "enum");
    super_types(p);
    if p.at(SyntaxKind::L_BRACE) {
        enum_body(p);
    } else {
        p.error(ErrorCode::E0304, "expected enum body");
    }
    p.finish_node();
}

/// ClassDecl | InterfaceDecl, including `@interface` annotation types
fn class_decl(p: &mut Parser, cp: Checkpoint) {
    let kind = if p.at(SyntaxKind::CLASS_KW) {
        SyntaxKind::CLASS_DECL
    } else {
        SyntaxKind::INTERFACE_DECL
    };
    p.start_node_at(cp, kind);
    p.eat(SyntaxKind::AT);
    p.bump(); // class | interface
    let what = if kind == SyntaxKind::CLASS_DECL { "class" } else { "interface" };
    name(p, what);
    if p.at(SyntaxKind::LT) {
        type_params(p);
    }
    super_types(p);
    if p.at(SyntaxKind::L_BRACE) {
        class_body(p);
    } else {
        p.error(ErrorCode::E0304, format!("expected {} body", what));
    }
    p.finish_node();
}

/// SuperTypes = (('extends' | 'implements') TypeRef (',' TypeRef)*)+
fn super_types(p: &mut Parser) {
    if !p.at_any(&[SyntaxKind::EXTENDS_KW, SyntaxKind::IMPLEMENTS_KW]) {
        return;
    }
    p.start_node(SyntaxKind::SUPER_TYPES);
    while p.at_any(&[SyntaxKind::EXTENDS_KW, SyntaxKind::IMPLEMENTS_KW]) {
        p.bump();
        type_ref(p);
        while p.eat(SyntaxKind::COMMA) {
            type_ref(p);
        }
    }
    p.finish_node();
}

/// TypeParams = '<' ... '>' (kept flat, angles balanced)
fn type_params(p: &mut Parser) {
    p.start_node(SyntaxKind::TYPE_PARAMS);
    p.bump(); // <
    let mut depth = 1;
    while depth > 0 && !p.at_eof() && !p.at_any(&[SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON]) {
        match p.current() {
            SyntaxKind::LT => depth += 1,
            SyntaxKind::GT => depth -= 1,
            _ => {}
        }
        p.bump();
    }
    p.finish_node();
}

fn enum_body(p: &mut Parser) {
    if !p.enter() {
        return;
    }
    p.start_node(SyntaxKind::ENUM_BODY);
    let open = p.current_range();
    p.bump(); // {
    p.push_context(ParseContext::EnumBody);

    if at_constant_start(p) {
        while at_constant_start(p) {
            enum_constant(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    } else {
        // `enum E { , }` declares no constants
        p.eat(SyntaxKind::COMMA);
    }

    if !p.eat(SyntaxKind::SEMICOLON) && !p.at(SyntaxKind::R_BRACE) && !p.at_eof() {
        p.expect_semicolon();
    }
    members(p);

    p.pop_context();
    p.close_brace(open, "enum body");
    p.finish_node();
    p.leave();
}

/// Whether the cursor sits on an enum constant rather than a member
fn at_constant_start(p: &Parser) -> bool {
    let n = skip_annotations_ahead(p, 0);
    p.nth_at(n, SyntaxKind::IDENT) && CONSTANT_FOLLOW.contains(&p.nth(n + 1))
}

/// Index of the first token after any annotations starting at `n`
fn skip_annotations_ahead(p: &Parser, mut n: usize) -> usize {
    while p.nth_at(n, SyntaxKind::AT) && p.nth_at(n + 1, SyntaxKind::IDENT) {
        n += 2;
        while p.nth_at(n, SyntaxKind::DOT) && p.nth_at(n + 1, SyntaxKind::IDENT) {
            n += 2;
        }
        if p.nth_at(n, SyntaxKind::L_PAREN) {
            let mut depth = 0usize;
            while p.has_nth(n) {
                match p.nth(n) {
                    SyntaxKind::L_PAREN => depth += 1,
                    SyntaxKind::R_PAREN => depth -= 1,
                    _ => {}
                }
                n += 1;
                if depth == 0 {
                    break;
                }
            }
        }
    }
    n
}

fn enum_constant(p: &mut Parser) {
    p.start_node(SyntaxKind::ENUM_CONSTANT);
    modifiers(p);
    name(p, "constant");
    if p.at(SyntaxKind::L_PAREN) {
        arg_list(p);
    }
    if p.at(SyntaxKind::L_BRACE) {
        class_body(p);
    }
    p.finish_node();
}

/// ClassBody = '{' Member* '}'
pub(super) fn class_body(p: &mut Parser) {
    if !p.enter() {
        return;
    }
    p.start_node(SyntaxKind::CLASS_BODY);
    let open = p.current_range();
    p.bump(); // {
    p.push_context(ParseContext::ClassBody);
    members(p);
    p.pop_context();
    p.close_brace(open, "class body");
    p.finish_node();
    p.leave();
}

fn members(p: &mut Parser) {
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        let before = p.position();
        member(p);
        if p.position() == before {
            p.error_unexpected(ErrorCode::E0303);
            p.bump_error();
        }
    }
}

fn member(p: &mut Parser) {
    match p.current() {
        SyntaxKind::SEMICOLON => p.bump(),
        SyntaxKind::L_BRACE => initializer(p),
        SyntaxKind::STATIC_KW if p.nth_at(1, SyntaxKind::L_BRACE) => initializer(p),
        _ => {
            let cp = p.checkpoint();
            let had_modifiers = modifiers(p);
            if p.at_any(TYPE_DECL_KEYWORDS)
                || (p.at(SyntaxKind::AT) && p.nth_at(1, SyntaxKind::INTERFACE_KW))
            {
                type_decl_at(p, cp);
                return;
            }
            if p.at(SyntaxKind::LT) {
                type_params(p);
            }
            if p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::L_PAREN) {
                constructor_decl(p, cp);
            } else if at_type_start(p) {
                method_or_field(p, cp);
            } else {
                p.error_unexpected(ErrorCode::E0303);
                if had_modifiers {
                    p.start_node_at(cp, SyntaxKind::ERROR);
                    p.finish_node();
                }
                p.recover();
            }
        }
    }
}

/// Initializer = 'static'? Block
fn initializer(p: &mut Parser) {
    p.start_node(SyntaxKind::INITIALIZER);
    p.eat(SyntaxKind::STATIC_KW);
    block(p);
    p.finish_node();
}

fn constructor_decl(p: &mut Parser, cp: Checkpoint) {
    p.start_node_at(cp, SyntaxKind::CONSTRUCTOR_DECL);
    name(p, "constructor");
    param_list(p);
    throws_clause(p);
    if p.at(SyntaxKind::L_BRACE) {
        block(p);
    } else {
        p.error(ErrorCode::E0304, "expected constructor body");
    }
    p.finish_node();
}

fn method_or_field(p: &mut Parser, cp: Checkpoint) {
    type_ref(p);
    if p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::L_PAREN) {
        p.start_node_at(cp, SyntaxKind::METHOD_DECL);
        name(p, "method");
        param_list(p);
        dims(p);
        throws_clause(p);
        if p.at(SyntaxKind::L_BRACE) {
            block(p);
        } else {
            if p.eat(SyntaxKind::DEFAULT_KW) {
                expression(p);
            }
            if !p.eat(SyntaxKind::SEMICOLON) {
                p.error(ErrorCode::E0304, "expected method body or ';'");
            }
        }
        p.finish_node();
    } else {
        p.start_node_at(cp, SyntaxKind::FIELD_DECL);
        var_declarators(p, "field");
        p.expect_semicolon();
        p.finish_node();
    }
}

/// VarDeclarator (',' VarDeclarator)*
pub(super) fn var_declarators(p: &mut Parser, what: &str) {
    var_declarator(p, what);
    while p.eat(SyntaxKind::COMMA) {
        var_declarator(p, what);
    }
}

/// VarDeclarator = Name ('[' ']')* ('=' (Expression | ArrayInit))?
fn var_declarator(p: &mut Parser, what: &str) {
    if !p.at(SyntaxKind::IDENT) {
        p.error(ErrorCode::E0301, format!("expected {} name", what));
        return;
    }
    p.start_node(SyntaxKind::VAR_DECLARATOR);
    name(p, what);
    dims(p);
    if p.eat(SyntaxKind::EQ) {
        if p.at(SyntaxKind::L_BRACE) {
            array_init(p);
        } else {
            expression(p);
        }
    }
    p.finish_node();
}

fn dims(p: &mut Parser) {
    while p.at(SyntaxKind::L_BRACKET) && p.nth_at(1, SyntaxKind::R_BRACKET) {
        p.bump();
        p.bump();
    }
}

/// ParamList = '(' (Param (',' Param)*)? ')'
fn param_list(p: &mut Parser) {
    p.start_node(SyntaxKind::PARAM_LIST);
    let open = p.current_range();
    p.bump(); // (
    p.push_context(ParseContext::ParameterList);
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            param(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.pop_context();
    p.close_paren(open);
    p.finish_node();
}

/// Param = Modifiers? TypeRef '...'? Name
fn param(p: &mut Parser) {
    let cp = p.checkpoint();
    modifiers(p);
    if !at_type_start(p) {
        p.error_unexpected(ErrorCode::E0302);
        p.recover();
        return;
    }
    p.start_node_at(cp, SyntaxKind::PARAM);
    type_ref(p);
    p.eat(SyntaxKind::ELLIPSIS);
    name(p, "parameter");
    dims(p);
    p.finish_node();
}

fn throws_clause(p: &mut Parser) {
    if !p.at(SyntaxKind::THROWS_KW) {
        return;
    }
    p.start_node(SyntaxKind::THROWS_CLAUSE);
    p.bump();
    type_ref(p);
    while p.eat(SyntaxKind::COMMA) {
        type_ref(p);
    }
    p.finish_node();
}

pub(super) fn at_type_start(p: &Parser) -> bool {
    p.at(SyntaxKind::IDENT) || (!p.at_eof() && p.current().is_primitive_type())
}

/// TypeRef = (primitive | IDENT TypeArgs? ('.' IDENT TypeArgs?)*) ('[' ']')*
pub(super) fn type_ref(p: &mut Parser) -> bool {
    if !at_type_start(p) {
        p.error(ErrorCode::E0302, "expected type");
        return false;
    }
    p.start_node(SyntaxKind::TYPE_REF);
    let primitive = p.current().is_primitive_type();
    p.bump();
    if !primitive {
        if p.at(SyntaxKind::LT) {
            type_args(p);
        }
        while p.at(SyntaxKind::DOT) && p.nth_at(1, SyntaxKind::IDENT) {
            p.bump();
            p.bump();
            if p.at(SyntaxKind::LT) {
                type_args(p);
            }
        }
    }
    dims(p);
    p.finish_node();
    true
}

/// TypeArgs = '<' (TypeArg (',' TypeArg)*)? '>'
fn type_args(p: &mut Parser) {
    if !p.enter() {
        return;
    }
    p.start_node(SyntaxKind::TYPE_ARGS);
    p.bump(); // <
    if !p.at(SyntaxKind::GT) {
        loop {
            if p.eat(SyntaxKind::QUESTION) {
                if p.eat(SyntaxKind::EXTENDS_KW) || p.eat(SyntaxKind::SUPER_KW) {
                    type_ref(p);
                }
            } else if !type_ref(p) {
                break;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::GT, ErrorCode::E0302);
    p.finish_node();
    p.leave();
}
