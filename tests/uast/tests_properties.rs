//! Property-based tests over generated enum declarations
//!
//! Sources are rendered from a small model of an enum (constants with
//! optional arguments, bodies, annotations and surrounding comments, plus
//! fields, methods and nested enums) so every property can be checked
//! against what was generated.

use std::fmt::Write;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use uast::{NodeKind, UastNode};

use crate::helpers::uast_assertions::*;

/// Comment placed in front of a constant
#[derive(Debug, Clone, Copy)]
enum Lead {
    None,
    Line,
    Block,
    Doc,
}

impl Lead {
    fn render(self, i: usize) -> String {
        match self {
            Lead::None => String::new(),
            Lead::Line => format!("// constant {i}\n    "),
            Lead::Block => format!("/* constant {i} */ "),
            Lead::Doc => format!("/**\n     * Constant {i}.\n     */\n    "),
        }
    }
}

#[derive(Debug, Clone)]
struct ConstantSpec {
    lead: Lead,
    annotated: bool,
    argument: Option<u16>,
    body: bool,
    trailing_comment: bool,
}

#[derive(Debug, Clone)]
enum MemberSpec {
    Field,
    Method,
    Nested(EnumSpec),
}

#[derive(Debug, Clone)]
struct EnumSpec {
    constants: Vec<ConstantSpec>,
    members: Vec<MemberSpec>,
}

impl EnumSpec {
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "enum {name} {{");
        let last = self.constants.len().saturating_sub(1);
        for (i, c) in self.constants.iter().enumerate() {
            let _ = write!(out, "    {}", c.lead.render(i));
            if c.annotated {
                out.push_str("@Deprecated ");
            }
            let _ = write!(out, "C{i}");
            if let Some(argument) = c.argument {
                let _ = write!(out, "( /* arg */ {argument} )");
            }
            if c.body {
                let _ = write!(out, " {{ /* body */ void m{i}() {{ }} }}");
            }
            if i != last {
                out.push(',');
            }
            if c.trailing_comment {
                let _ = write!(out, " // after C{i}");
            }
            out.push('\n');
        }
        out.push_str("    ;\n");
        for (i, member) in self.members.iter().enumerate() {
            match member {
                MemberSpec::Field => {
                    let _ = writeln!(out, "    int f{i} = /* init */ {i}; // field");
                }
                MemberSpec::Method => {
                    let _ = writeln!(out, "    int g{i}(int a) {{ return a + {i}; }}");
                }
                MemberSpec::Nested(inner) => inner.render(&format!("{name}N{i}"), out),
            }
        }
        out.push_str("}\n");
    }

    /// Constants with a body, nested enums included
    fn bodies(&self) -> usize {
        let own = self.constants.iter().filter(|c| c.body).count();
        let nested: usize = self
            .members
            .iter()
            .map(|m| match m {
                MemberSpec::Nested(inner) => inner.bodies(),
                _ => 0,
            })
            .sum();
        own + nested
    }
}

fn lead_strategy() -> impl Strategy<Value = Lead> {
    prop_oneof![Just(Lead::None), Just(Lead::Line), Just(Lead::Block), Just(Lead::Doc)]
}

fn constant_strategy() -> impl Strategy<Value = ConstantSpec> {
    (
        lead_strategy(),
        any::<bool>(),
        prop::option::of(0u16..1000),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(lead, annotated, argument, body, trailing_comment)| ConstantSpec {
            lead,
            annotated,
            argument,
            body,
            trailing_comment,
        })
}

fn enum_strategy() -> impl Strategy<Value = EnumSpec> {
    let leaf = prop::collection::vec(constant_strategy(), 0..5).prop_map(|constants| EnumSpec {
        constants,
        members: Vec::new(),
    });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            prop::collection::vec(constant_strategy(), 0..5),
            prop::collection::vec(
                prop_oneof![
                    Just(MemberSpec::Field),
                    Just(MemberSpec::Method),
                    inner.prop_map(MemberSpec::Nested),
                ],
                0..4,
            ),
        )
            .prop_map(|(constants, members)| EnumSpec { constants, members })
    })
}

fn type_members(node: &UastNode) -> Vec<&UastNode> {
    node.children()
        .iter()
        .filter(|c| {
            !c.kind().is_enum_constant()
                && !matches!(
                    c.kind(),
                    NodeKind::Modifier
                        | NodeKind::Annotation
                        | NodeKind::Identifier
                        | NodeKind::TypeReference
                )
        })
        .collect()
}

/// Compare a built enum declaration against the model it was rendered from
fn check_declaration(spec: &EnumSpec, node: &UastNode, source: &str) -> Result<(), TestCaseError> {
    prop_assert_eq!(node.kind(), &NodeKind::EnumDeclaration);

    let constants: Vec<_> = node.children_of(NodeKind::is_enum_constant).collect();
    prop_assert_eq!(constants.len(), spec.constants.len());
    for (i, (constant, model)) in constants.iter().zip(&spec.constants).enumerate() {
        let expected = format!("C{i}");
        prop_assert_eq!(constant.name(), Some(expected.as_str()));
        prop_assert_eq!(constant.kind().ordinal(), Some(i as u32));

        let mut kinds = Vec::new();
        if model.annotated {
            kinds.push("Annotation");
        }
        kinds.push("Identifier");
        if model.argument.is_some() {
            kinds.push("Arguments");
        }
        if model.body {
            kinds.push("AnonymousClass");
        }
        prop_assert_eq!(child_kinds(constant), kinds);
        let text = constant.text(source).unwrap_or_default();
        prop_assert!(!text.starts_with('/') && !text.ends_with('/'), "comment inside {:?}", text);
    }

    let members = type_members(node);
    prop_assert_eq!(members.len(), spec.members.len());
    for (member, model) in members.iter().zip(&spec.members) {
        match model {
            MemberSpec::Field => prop_assert_eq!(member.kind(), &NodeKind::FieldDeclaration),
            MemberSpec::Method => prop_assert_eq!(member.kind(), &NodeKind::FunctionDeclaration),
            MemberSpec::Nested(inner) => check_declaration(inner, member, source)?,
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_structure_follows_source(spec in enum_strategy()) {
        let mut source = String::new();
        spec.render("Generated", &mut source);
        let result = normalize_single(&source);

        prop_assert_eq!(result.name(), Some("Generated"));
        check_declaration(&spec, &result.root, &source)?;
    }

    #[test]
    fn test_spans_nest_and_round_trip(spec in enum_strategy()) {
        let mut source = String::new();
        spec.render("Generated", &mut source);
        let result = normalize_single(&source);

        assert_containment(&result.root);
        assert_round_trip(&result.root, &source);
    }

    #[test]
    fn test_bodies_without_contract_are_unresolved(spec in enum_strategy()) {
        let mut source = String::new();
        spec.render("Generated", &mut source);
        let result = normalize_single(&source);

        prop_assert!(result.links.is_empty());
        prop_assert_eq!(result.observations.len(), spec.bodies());
        prop_assert!(result.observations.iter().all(|o| o.is_unresolved_override()));
    }

    #[test]
    fn test_every_body_links_to_the_contract(bodies in prop::collection::vec(any::<bool>(), 1..8)) {
        let constants: Vec<_> = bodies
            .iter()
            .enumerate()
            .map(|(i, &body)| {
                if body {
                    format!("C{i} {{ int apply(int x) {{ return x + {i}; }} }}")
                } else {
                    format!("C{i}")
                }
            })
            .collect();
        let source = format!(
            "enum Op {{ {}; abstract int apply(int x); }}",
            constants.join(", ")
        );
        let result = normalize_single(&source);

        let expected: Vec<_> = bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| **body)
            .map(|(i, _)| (format!("C{i}"), i as u32))
            .collect();
        let linked: Vec<_> = result
            .links
            .iter()
            .map(|l| (l.constant.to_string(), l.ordinal))
            .collect();
        prop_assert_eq!(linked, expected);
        prop_assert!(result.observations.is_empty());

        for link in &result.links {
            let (contract, implementation) = result.resolve_link(link).unwrap();
            prop_assert_eq!(contract.name(), Some("apply"));
            prop_assert_eq!(implementation.name(), Some("apply"));
        }
    }
}
