//! Java front-end parser tests.
//!
//! Tests the lossless rowan CST and the typed AST layer for:
//! - Enum declarations with constants, arguments and bodies
//! - Class bodies, members, statements and expressions
//! - Error recovery on malformed input

use rstest::rstest;
use uast::parser::{AstNode, ErrorCode, SourceFile, SyntaxKind, parse_java};

use crate::helpers::source_fixtures::*;

fn assert_parses(input: &str) {
    let parse = parse_java(input);
    assert!(
        parse.ok(),
        "Failed to parse: {:?}\nInput: {}",
        parse.errors,
        input
    );
    assert_eq!(parse.syntax().text().to_string(), input, "CST is not lossless");
}

// ============================================================================
// Enum Declarations
// ============================================================================

#[rstest]
#[case("enum A {}")]
#[case("enum A { X }")]
#[case("enum A { X, Y, }")]
#[case("enum A { ; }")]
#[case("public enum A implements B, C { X; }")]
#[case("enum A { X(1, \"two\", 3.0), Y() }")]
#[case("enum A { @Deprecated X, Y }")]
#[case("enum A { X { void f() {} }, Y { } }")]
#[case("enum A { X; private final int v = 1; A() {} static int count() { return 0; } }")]
#[case("enum A { X; abstract int f(int a, String... rest) throws Exception; }")]
#[case("enum A { X; enum B { Y } interface C {} class D {} }")]
fn test_enum_declarations(#[case] input: &str) {
    assert_parses(input);
}

// ============================================================================
// Statements and Expressions
// ============================================================================

#[rstest]
#[case("return a + b * c;")]
#[case("if (a && !b) { x = 1; } else if (c) { x = 2; } else x = 3;")]
#[case("int[] xs = new int[] { 1, 2 };")]
#[case("java.util.List<String> names = new java.util.ArrayList<>();")]
#[case("x += this.y++;")]
#[case("Runnable r = () -> { run(); };")]
#[case("for (int i = 0; i < n; i++) { total += i; }")]
#[case("try { f(); } catch (Exception e) { g(); } finally { h(); }")]
#[case("Object o = flag ? (Object) a : b;")]
#[case("boolean b = o instanceof String;")]
#[case("list.forEach(System.out::println);")]
fn test_method_bodies(#[case] statement: &str) {
    assert_parses(&format!("enum A {{ X; void f() {{ {statement} }} }}"));
}

#[test]
fn test_fixture_parses() {
    assert_parses(ENUM_FIXTURE);
    let parse = parse_java(ENUM_FIXTURE);
    let file = SourceFile::cast(parse.syntax()).unwrap();
    let names: Vec<_> = file
        .enum_decls()
        .filter_map(|d| d.name().and_then(|n| n.text()))
        .collect();
    assert_eq!(names, ["Season", "Colors", "InnerEnum", "Direction", "DataType"]);
}

#[test]
fn test_fixture_typed_ast() {
    let parse = parse_java(DATA_TYPE);
    let file = SourceFile::cast(parse.syntax()).unwrap();
    let decl = file.outermost_enum_decls().next().unwrap();

    let constants: Vec<_> = decl.constants().collect();
    assert_eq!(constants.len(), 3);
    for constant in &constants {
        assert_eq!(constant.arg_list().map(|a| a.args().count()), Some(1));
        assert!(constant.body().is_some());
    }
    assert_eq!(decl.members().count(), 4);
}

// ============================================================================
// Error Recovery
// ============================================================================

#[rstest]
#[case("enum A { X, Y", ErrorCode::E0202)]
#[case("enum A { X } }", ErrorCode::E0205)]
#[case("enum { X }", ErrorCode::E0301)]
#[case("enum A { X; void f() { return 1 } }", ErrorCode::E0201)]
#[case("enum A", ErrorCode::E0304)]
#[case("enum A { X # }", ErrorCode::E0101)]
fn test_error_codes(#[case] input: &str, #[case] code: ErrorCode) {
    let parse = parse_java(input);
    assert!(
        parse.errors.iter().any(|e| e.code == code),
        "expected {:?} in {:?}",
        code,
        parse.errors
    );
    assert_eq!(parse.syntax().text().to_string(), input);
}

#[test]
fn test_broken_file_still_has_tree() {
    let parse = parse_java(MIXED_FILE);
    assert!(!parse.ok());
    let root = parse.syntax();
    let enums = root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ENUM_DECL)
        .count();
    assert_eq!(enums, 2);
}
