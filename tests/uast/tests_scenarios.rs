//! End-to-end normalization of the enum fixtures.

use rstest::rstest;
use uast::{
    FileId, MemberKey, NodeKind, NormalizerConfig, Observation, Role, normalize_files,
    normalize_source,
};

use crate::helpers::source_fixtures::*;
use crate::helpers::uast_assertions::*;

#[test]
fn test_season_has_plain_constants() {
    let result = normalize_single(SEASON);
    assert_eq!(result.name(), Some("Season"));
    assert_eq!(constant_names(&result), ["WINTER", "SPRING", "SUMMER", "AUTUMN"]);
    assert_eq!(result.members().count(), 0);
    assert!(result.links.is_empty());
    assert!(result.observations.is_empty());

    for (i, constant) in result.constants().enumerate() {
        assert_eq!(constant.kind().ordinal(), Some(i as u32));
        assert_eq!(child_kinds(constant), ["Identifier"]);
        assert!(constant.has_role(Role::Constant));
    }
}

#[test]
fn test_colors_keeps_nested_enum_as_member() {
    let result = normalize_single(COLORS);
    assert_eq!(constant_names(&result), ["RED", "YELLOW", "GREEN"]);

    let members: Vec<_> = result.members().collect();
    assert_eq!(members.len(), 1);
    let inner = members[0];
    assert_eq!(*inner.kind(), NodeKind::EnumDeclaration);
    assert_eq!(inner.name(), Some("InnerEnum"));
    assert_eq!(child_kinds(inner), ["Identifier"]);
    assert!(inner.has_role(Role::Enumeration));
}

#[test]
fn test_direction_links_each_body_to_the_abstract_member() {
    let result = normalize_single(DIRECTION);
    assert_eq!(constant_names(&result), ["UP", "DOWN"]);

    let abstracts: Vec<_> = result.abstract_members().collect();
    assert_eq!(abstracts.len(), 1);
    assert_eq!(abstracts[0].name(), Some("opposite"));

    assert_eq!(result.links.len(), 2);
    for (ordinal, link) in result.links.iter().enumerate() {
        assert_eq!(link.key, MemberKey::new("opposite", 0));
        assert_eq!(link.ordinal, ordinal as u32);
        assert_eq!(link.abstract_path.to_string(), "/3");
        assert_eq!(link.implementation_path.to_string(), format!("/{}/1/0", ordinal + 1));
    }
    assert!(result.observations.is_empty());

    for constant in result.constants() {
        assert_eq!(child_kinds(constant), ["Identifier", "AnonymousClass"]);
        let body = &constant.children()[1];
        assert_eq!(body.children().len(), 1);
        assert_eq!(body.children()[0].name(), Some("opposite"));
    }
}

#[test]
fn test_data_type_constants_carry_arguments_and_bodies() {
    let result = normalize_single(DATA_TYPE);
    assert_eq!(constant_names(&result), ["INT", "INTEGER", "STRING"]);

    let flags: Vec<_> = result
        .constants()
        .map(|c| {
            assert_eq!(child_kinds(c), ["Identifier", "Arguments", "AnonymousClass"]);
            let arguments = &c.children()[1];
            assert_eq!(arguments.children().len(), 1);
            arguments.children()[0].token().unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(flags, ["true", "false", "false"]);

    let members: Vec<_> = result.members().map(|m| m.kind().name().to_string()).collect();
    assert_eq!(
        members,
        [
            "FieldDeclaration",
            "ConstructorDeclaration",
            "FunctionDeclaration",
            "FunctionDeclaration"
        ]
    );

    let key = MemberKey::new("parse", 1);
    assert_eq!(result.abstract_members().count(), 1);
    assert_eq!(result.links.len(), 3);
    assert!(result.links.iter().all(|l| l.key == key));
    let linked: Vec<_> = result.links.iter().map(|l| l.constant.as_str()).collect();
    assert_eq!(linked, ["INT", "INTEGER", "STRING"]);
    assert_eq!(result.implementations_of(&key).count(), 3);
    assert!(result.observations.is_empty());

    // `isPrimitive` is concrete and never linked
    let concrete = result.members().find(|m| m.name() == Some("isPrimitive")).unwrap();
    assert!(concrete.children().iter().any(|c| *c.kind() == NodeKind::Block));
}

#[test]
fn test_override_of_inherited_method_is_unresolved() {
    let result = normalize_single(INHERITED_OVERRIDE);
    assert!(result.links.is_empty());
    assert_eq!(result.observations.len(), 1);
    match &result.observations[0] {
        Observation::UnresolvedOverride {
            constant,
            ordinal,
            key,
            ..
        } => {
            assert_eq!(constant, "EARTH");
            assert_eq!(*ordinal, 0);
            assert_eq!(*key, MemberKey::new("toString", 0));
        }
        other => panic!("unexpected observation {other:?}"),
    }
}

#[rstest]
#[case("Season", 4, 0)]
#[case("Colors", 3, 0)]
#[case("Direction", 2, 2)]
#[case("DataType", 3, 3)]
fn test_fixture_file(#[case] name: &str, #[case] constants: usize, #[case] links: usize) {
    let file = normalize_source(ENUM_FIXTURE, &NormalizerConfig::default());
    assert!(file.syntax_errors.is_empty(), "{:?}", file.syntax_errors);
    assert_eq!(file.declarations.len(), 4);
    assert_eq!(file.failures().count(), 0);

    let result = file.find(name).unwrap();
    assert_eq!(result.constants().count(), constants);
    assert_eq!(result.links.len(), links);
    assert_containment(&result.root);
    assert_round_trip(&result.root, ENUM_FIXTURE);
}

#[test]
fn test_broken_declaration_does_not_hide_siblings() {
    let file = normalize_source(MIXED_FILE, &NormalizerConfig::default());
    assert!(!file.syntax_errors.is_empty());
    assert_eq!(file.declarations.len(), 2);

    let mode = file.find("Mode").unwrap();
    assert_eq!(constant_names(mode), ["ON", "OFF"]);
    assert_eq!(child_kinds(&mode.root)[0], "Modifier");

    assert!(file.declarations[1].is_err());
    assert!(!file.has_defects());
}

#[test]
fn test_log_string_lists_kind_token_roles_and_span() {
    let result = normalize_single(SEASON);
    let log = result.root.log_string();
    let lines: Vec<_> = log.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "EnumDeclaration (Season) [Declaration, Type, Enumeration] @0:0..0:46");
    assert!(lines[1].starts_with("  Identifier (Season) ["));
    assert!(lines[1].ends_with("@0:5..0:11"));
    assert_eq!(
        lines[2],
        "  EnumConstant#0 (WINTER) [Declaration, Enumeration, Member, Constant] @0:14..0:20"
    );
    assert!(lines[3].starts_with("    Identifier (WINTER) ["));
    assert!(lines[4].starts_with("  EnumConstant#1 (SPRING) ["));
}

#[test]
fn test_batch_over_fixtures() {
    let sources = [SEASON, COLORS, DIRECTION, DATA_TYPE, MIXED_FILE];
    let files: Vec<_> = sources
        .iter()
        .enumerate()
        .map(|(i, s)| (FileId::new(i as u32), *s))
        .collect();

    let results = normalize_files(&files, &NormalizerConfig::default());
    let names: Vec<_> = results
        .iter()
        .map(|(_, file)| file.normalized().next().and_then(|n| n.name()).unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["Season", "Colors", "Direction", "DataType", "Mode"]);

    let failed: Vec<_> = results
        .iter()
        .filter(|(_, file)| file.failures().count() > 0)
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(failed, [FileId::new(4)]);
}

#[test]
fn test_disabling_bodies_keeps_links() {
    let config = NormalizerConfig::default().with_normalize_bodies(false);
    let file = normalize_source(DIRECTION, &config);
    let result = file.find("Direction").unwrap();
    assert_eq!(result.links.len(), 2);
    for (_, implementation) in result.links.iter().filter_map(|l| result.resolve_link(l)) {
        let block = implementation.children().last().unwrap();
        assert_eq!(*block.kind(), NodeKind::Block);
        assert!(block.children().is_empty());
    }
}

#[test]
fn test_comments_stay_outside_nodes() {
    let result = normalize_single(COMMENTED);
    assert_round_trip(&result.root, COMMENTED);
    assert_containment(&result.root);
    assert_eq!(constant_names(&result), ["LOW", "MEDIUM", "HIGH"]);
    assert_eq!(&child_kinds(&result.root)[..2], ["Annotation", "Modifier"]);

    let texts: Vec<_> = result
        .constants()
        .map(|c| c.text(COMMENTED).unwrap_or_default().lines().next().unwrap_or_default())
        .collect();
    assert_eq!(texts, ["LOW(1)", "MEDIUM(/* two */ 2)", "@Deprecated"]);

    let high = result.constants().nth(2).unwrap();
    assert_eq!(child_kinds(high), ["Annotation", "Identifier", "Arguments", "AnonymousClass"]);
    assert_eq!(high.span().start.line, 10);
    let medium_argument = &result.constants().nth(1).unwrap().children()[1].children()[0];
    assert_eq!(medium_argument.token(), Some("2"));

    // `urgent` is concrete, so the body override stays unresolved
    assert!(result.links.is_empty());
    assert_eq!(result.observations.len(), 1);
}

#[rstest]
#[case("enum E { /** doc */ A, // c\n B }", &["A", "B"])]
#[case("enum E { A /* a */ , /* b */ B /* end */ }", &["A", "B"])]
#[case("enum E { // only\n A; // tail\n }", &["A"])]
#[case("enum E { /* one */ @Deprecated /* two */ A }", &["A"])]
fn test_inline_comments(#[case] source: &str, #[case] names: &[&str]) {
    let result = normalize_single(source);
    assert_eq!(constant_names(&result), names);
    assert_round_trip(&result.root, source);
}
