use super::*;
use crate::frontend::JavaFrontend;
use crate::parser::parse_java;

fn normalize_with(source: &str, config: NormalizerConfig) -> Vec<Result<EnumNormalization>> {
    let parse = parse_java(source);
    let frontend = JavaFrontend;
    EnumNormalizer::new(&frontend, source, config).normalize_all(&parse.syntax())
}

fn normalize_one(source: &str) -> EnumNormalization {
    let mut results = normalize_with(source, NormalizerConfig::default());
    assert_eq!(results.len(), 1);
    results.remove(0).expect("normalization failed")
}

fn kinds(node: &UastNode) -> Vec<String> {
    node.children().iter().map(|c| c.kind().to_string()).collect()
}

#[test]
fn test_plain_constants() {
    let result = normalize_one("enum Season { WINTER, SPRING, SUMMER, AUTUMN }");
    assert_eq!(result.name(), Some("Season"));
    let names: Vec<_> = result.constants().filter_map(|c| c.name()).collect();
    assert_eq!(names, ["WINTER", "SPRING", "SUMMER", "AUTUMN"]);
    assert!(result.links.is_empty());
    assert!(result.observations.is_empty());
    assert_eq!(result.supertype, "java.lang.Enum");
}

#[test]
fn test_empty_enum() {
    let result = normalize_one("enum Nothing {}");
    assert_eq!(result.constants().count(), 0);
    assert_eq!(result.members().count(), 0);
    assert_eq!(kinds(&result.root), ["Identifier"]);
}

#[test]
fn test_ordinals_follow_declaration_order() {
    let result = normalize_one("enum Level { HIGH(3), LOW(1), MID(2) }");
    let ordinals: Vec<_> = result.constants().filter_map(|c| c.kind().ordinal()).collect();
    assert_eq!(ordinals, [0, 1, 2]);
}

#[test]
fn test_constant_shapes() {
    let source = "enum Op { PLUS(\"+\") { int apply(int a, int b) { return a + b; } }, NOP; Op() {} Op(String s) {} int apply(int a, int b) { return 0; } }";
    let result = normalize_one(source);
    let constants: Vec<_> = result.constants().collect();
    assert_eq!(kinds(constants[0]), ["Identifier", "Arguments", "AnonymousClass"]);
    assert_eq!(kinds(constants[1]), ["Identifier"]);

    let args = &constants[0].children()[1];
    assert_eq!(args.text(source), Some("(\"+\")"));
    assert_eq!(args.children()[0].token(), Some("\"+\""));

    // `apply` is concrete on the enum, so the body method overrides nothing abstract
    assert!(result.links.is_empty());
    assert_eq!(result.unresolved_overrides().count(), 1);
}

#[test]
fn test_abstract_contract_links() {
    let source = "enum Direction { UP { Direction opposite() { return DOWN; } }, DOWN { Direction opposite() { return UP; } }; abstract Direction opposite(); }";
    let result = normalize_one(source);
    assert_eq!(result.abstract_members().count(), 1);
    assert_eq!(result.links.len(), 2);

    let key = MemberKey::new("opposite", 0);
    let constants: Vec<_> = result.links.iter().map(|l| l.constant.as_str()).collect();
    assert_eq!(constants, ["UP", "DOWN"]);
    assert_eq!(result.implementations_of(&key).count(), 2);

    for link in &result.links {
        let (abstract_member, implementation) = result.resolve_link(link).unwrap();
        assert_eq!(abstract_member.name(), Some("opposite"));
        assert_eq!(implementation.name(), Some("opposite"));
        assert!(implementation.children().iter().any(|c| *c.kind() == NodeKind::Block));
        assert!(!abstract_member.children().iter().any(|c| *c.kind() == NodeKind::Block));
    }
    assert!(result.observations.is_empty());
}

#[test]
fn test_arity_distinguishes_overloads() {
    let source = "enum Shape { SQUARE { double area(double a) { return a * a; } }; abstract double area(); }";
    let result = normalize_one(source);
    assert!(result.links.is_empty());
    let observations: Vec<_> = result.observations.iter().collect();
    assert_eq!(observations.len(), 2);
    assert!(observations[0].is_unresolved_override());
    assert_eq!(observations[0].key(), &MemberKey::new("area", 1));
    assert!(matches!(observations[1], Observation::MissingImplementation { .. }));
    assert_eq!(observations[1].key(), &MemberKey::new("area", 0));
}

#[test]
fn test_missing_implementation_can_be_disabled() {
    let source = "enum Shape { SQUARE { }, CIRCLE; abstract double area(); }";
    let config = NormalizerConfig::default().with_report_missing_implementations(false);
    let result = normalize_with(source, config).remove(0).unwrap();
    assert!(result.observations.is_empty());

    let result = normalize_one(source);
    assert_eq!(result.observations.len(), 1);
    assert_eq!(result.observations[0].constant(), "SQUARE");
}

#[test]
fn test_nested_enum_in_member_section() {
    let result = normalize_one("enum Colors { RED, YELLOW, GREEN; enum InnerEnum {} }");
    assert_eq!(result.constants().count(), 3);
    let members: Vec<_> = result.members().collect();
    assert_eq!(members.len(), 1);
    assert_eq!(*members[0].kind(), NodeKind::EnumDeclaration);
    assert_eq!(members[0].name(), Some("InnerEnum"));
    assert_eq!(members[0].children_of(NodeKind::is_enum_constant).count(), 0);
}

#[test]
fn test_nested_enum_links_use_root_paths() {
    let source = "enum Outer { A { enum Inner { X { void f() {} }; abstract void f(); } }; }";
    let result = normalize_one(source);
    assert_eq!(result.links.len(), 1);
    let link = &result.links[0];
    assert_eq!(link.constant, "X");
    assert!(link.implementation_path.starts_with(&link.owner));
    let (abstract_member, implementation) = result.resolve_link(link).unwrap();
    assert_eq!(abstract_member.name(), Some("f"));
    assert_eq!(implementation.name(), Some("f"));
    assert_eq!(result.root.resolve(&link.owner).and_then(|n| n.name()), Some("Inner"));
}

#[test]
fn test_members_keep_source_order() {
    let source = "enum E { A; int x; E() {} static { x = 1; } void f() {} class C {} }";
    let result = normalize_one(source);
    let members: Vec<_> = result.members().map(|m| m.kind().name().to_string()).collect();
    assert_eq!(
        members,
        [
            "FieldDeclaration",
            "ConstructorDeclaration",
            "Initializer",
            "FunctionDeclaration",
            "ClassDeclaration"
        ]
    );
}

#[test]
fn test_modifiers_and_annotations() {
    let source = "@Deprecated public enum E implements Runnable { A; @Override public void run() {} }";
    let result = normalize_one(source);
    assert_eq!(
        kinds(&result.root),
        ["Annotation", "Modifier", "Identifier", "TypeReference", "EnumConstant#0", "FunctionDeclaration"]
    );
    let annotation = &result.root.children()[0];
    assert_eq!(annotation.token(), Some("Deprecated"));
    assert_eq!(kinds(annotation), ["Identifier"]);
    assert!(annotation.has_role(Role::Annotation));
    assert!(annotation.has_role(Role::Modifier));
    assert!(!result.root.children()[1].has_role(Role::Annotation));

    let run = result.members().next().unwrap();
    assert_eq!(kinds(run), ["Annotation", "Modifier", "TypeReference", "Identifier", "Block"]);
    assert_eq!(run.children()[0].token(), Some("Override"));
}

#[test]
fn test_annotation_values() {
    let source = "enum E { @SuppressWarnings(\"unused\") @Meta(since = \"9\", level = 2) A }";
    let result = normalize_one(source);
    let constant = result.constants().next().unwrap();
    assert_eq!(kinds(constant), ["Annotation", "Annotation", "Identifier"]);
    assert_eq!(constant.name(), Some("A"));

    let single = &constant.children()[0];
    assert_eq!(kinds(single), ["Identifier", "Arguments"]);
    let value = &single.children()[1].children()[0];
    assert_eq!(*value.kind(), NodeKind::Literal);
    assert_eq!(value.token(), Some("\"unused\""));

    let pairs = &constant.children()[1].children()[1];
    let values: Vec<_> = pairs.children().iter().map(|c| c.token().unwrap_or_default()).collect();
    assert_eq!(values, ["since = \"9\"", "level = 2"]);
    assert!(pairs.children().iter().all(|c| c.has_role(Role::Incomplete)));
    assert!(crate::uast::span::PositionMapper::new(source).verify_tree(&result.root).is_ok());
}

#[test]
fn test_primitive_type_references() {
    let source = "enum E { A; int a; Integer b; long[] c; void f(double d) {} }";
    let result = normalize_one(source);
    let types: Vec<_> = result
        .root
        .descendants()
        .filter(|n| *n.kind() == NodeKind::TypeReference)
        .map(|n| (n.token().unwrap_or_default(), n.has_role(Role::Primitive)))
        .collect();
    assert_eq!(
        types,
        [("int", true), ("Integer", false), ("long[]", false), ("void", true), ("double", true)]
    );
}

#[test]
fn test_statement_lowering() {
    let source = "enum E { A; int f(int x) { int y = x + 1; if (y > 2) { return y; } else return -y; } }";
    let result = normalize_one(source);
    let method = result.members().next().unwrap();
    assert_eq!(kinds(method), ["TypeReference", "Identifier", "Parameter", "Block"]);

    let block = &method.children()[3];
    assert_eq!(kinds(block), ["VariableDeclaration", "If"]);
    let local = &block.children()[0];
    assert_eq!(kinds(local), ["TypeReference", "Identifier", "BinaryExpression"]);
    assert_eq!(kinds(&local.children()[2]), ["Identifier", "Operator", "Literal"]);

    let branch = &block.children()[1];
    assert_eq!(kinds(branch), ["BinaryExpression", "Block", "Return"]);
    assert_eq!(kinds(&branch.children()[2].children()[0]), ["Operator", "Identifier"]);
}

#[test]
fn test_expression_lowering() {
    let source = "enum E { A; void f() { this.total = helper.compute(1, new Object() { }) ; } }";
    let result = normalize_one(source);
    let method = result.members().next().unwrap();
    let statement = &method.children().last().unwrap().children()[0];
    assert_eq!(*statement.kind(), NodeKind::ExpressionStatement);

    let assignment = &statement.children()[0];
    assert_eq!(kinds(assignment), ["QualifiedReference", "Operator", "Call"]);
    assert_eq!(kinds(&assignment.children()[0]), ["This", "Identifier"]);

    let call = &assignment.children()[2];
    assert_eq!(kinds(call), ["QualifiedReference", "Arguments"]);
    let arguments = &call.children()[1];
    assert_eq!(kinds(arguments), ["Literal", "ObjectCreation"]);
    assert_eq!(kinds(&arguments.children()[1]), ["TypeReference", "Arguments", "AnonymousClass"]);
}

#[test]
fn test_opaque_statements() {
    let source = "enum E { A; void f() { for (int i = 0; i < 3; i++) { g(); } ; } }";
    let result = normalize_one(source);
    let method = result.members().next().unwrap();
    let block = method.children().last().unwrap();
    assert_eq!(kinds(block), ["statement", "empty"]);
    assert!(block.children()[0].has_role(Role::Incomplete));
}

#[test]
fn test_bodies_can_be_skipped() {
    let source = "enum E { A; void f() { g(); h(); } }";
    let config = NormalizerConfig::default().with_normalize_bodies(false);
    let result = normalize_with(source, config).remove(0).unwrap();
    let method = result.members().next().unwrap();
    let block = method.children().last().unwrap();
    assert_eq!(*block.kind(), NodeKind::Block);
    assert!(block.children().is_empty());
    assert_eq!(block.text(source), Some("{ g(); h(); }"));
}

#[test]
fn test_unbalanced_braces_fail_declaration_only() {
    let source = "enum Good { A }\nenum Broken { B, C";
    let results = normalize_with(source, NormalizerConfig::default());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().name(), Some("Good"));
    let err = results[1].as_ref().unwrap_err();
    assert!(matches!(err, UastError::MalformedFragment { .. }));
    assert!(!err.is_defect());
}

#[test]
fn test_max_depth_is_enforced() {
    let source = "enum E { A; void f() { { { { { { g(); } } } } } } }";
    let config = NormalizerConfig::default().with_max_depth(4);
    let err = normalize_with(source, config).remove(0).unwrap_err();
    assert!(err.to_string().contains("nesting deeper than 4"));
}

#[test]
fn test_long_operator_chain_is_not_nesting() {
    let terms: Vec<_> = (0..80).map(|i| format!("\"s{i}\"")).collect();
    let source = format!("enum E {{ A; String f() {{ return {}; }} }}", terms.join(" + "));
    let config = NormalizerConfig::default().with_max_depth(8);
    let result = normalize_with(&source, config).remove(0).unwrap();

    let method = result.members().next().unwrap();
    let ret = &method.children().last().unwrap().children()[0];
    assert_eq!(*ret.kind(), NodeKind::Return);

    // left spine: ((("s0" + "s1") + "s2") + ...)
    let mut spine = 0;
    let mut node = &ret.children()[0];
    while *node.kind() == NodeKind::BinaryExpression {
        let left = if spine == 78 { "Literal" } else { "BinaryExpression" };
        assert_eq!(kinds(node), [left, "Operator", "Literal"]);
        spine += 1;
        node = &node.children()[0];
    }
    assert_eq!(spine, 79);
    assert_eq!(node.token(), Some("\"s0\""));
    crate::uast::span::PositionMapper::new(&source)
        .verify_tree(&result.root)
        .unwrap();
}

#[test]
fn test_lone_comma_body_has_no_constants() {
    for source in ["enum E { , }", "enum E { ,; int x; }"] {
        let result = normalize_one(source);
        assert_eq!(result.constants().count(), 0, "{}", source);
        assert!(result.observations.is_empty());
    }
    let result = normalize_one("enum E { ,; int x; }");
    assert_eq!(kinds(&result.root), ["Identifier", "FieldDeclaration"]);
}

#[test]
fn test_same_key_abstract_overloads_are_all_recorded() {
    let source = "enum Conv { TEXT { Object f(String s) { return s; } }; abstract Object f(String s); abstract Object f(int i); }";
    let result = normalize_one(source);
    let abstracts: Vec<_> = result.abstract_members().collect();
    assert_eq!(abstracts.len(), 2);
    assert!(abstracts.iter().all(|m| m.name() == Some("f")));

    // the first declaration with the key is the link target
    assert_eq!(result.links.len(), 1);
    let (contract, _) = result.resolve_link(&result.links[0]).unwrap();
    assert!(std::ptr::eq(contract, abstracts[0]));
    assert!(result.observations.is_empty());
}

#[test]
fn test_spans_round_trip() {
    let source = "enum Season {\n    WINTER, SPRING;\n    private int x = 1;\n}\n";
    let result = normalize_one(source);
    for node in result.root.descendants() {
        let text = node.text(source).unwrap();
        if let Some(token) = node.token() {
            if node.kind().is_leaf() {
                assert_eq!(token, text);
            }
        }
    }
    let spring = result.constants().nth(1).unwrap();
    assert_eq!(spring.span().start, crate::base::LineCol::new(1, 12));
}
